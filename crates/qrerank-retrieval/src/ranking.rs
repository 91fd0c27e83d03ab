//! Final ordering: fidelity descending, earlier ANN rank first on ties.

use std::cmp::Ordering;

use qrerank_core::models::RankedPassage;

fn by_score_then_ann_rank(a: &RankedPassage, b: &RankedPassage) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.ann_rank.cmp(&b.ann_rank))
}

/// Sort scored passages and keep the best `top_k`.
pub fn rank_top_k(mut passages: Vec<RankedPassage>, top_k: usize) -> Vec<RankedPassage> {
    passages.sort_by(by_score_then_ann_rank);
    passages.truncate(top_k);
    passages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str, score: f64, ann_rank: usize) -> RankedPassage {
        RankedPassage {
            id: ann_rank as u64,
            text: text.into(),
            score,
            ann_rank,
        }
    }

    #[test]
    fn sorts_by_score_and_truncates() {
        let out = rank_top_k(
            vec![passage("a", 0.2, 0), passage("b", 0.9, 1), passage("c", 0.5, 2)],
            2,
        );
        let texts: Vec<_> = out.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[test]
    fn ties_prefer_earlier_ann_rank() {
        let out = rank_top_k(
            vec![passage("late", 0.5, 3), passage("early", 0.5, 1), passage("mid", 0.5, 2)],
            3,
        );
        let texts: Vec<_> = out.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["early", "mid", "late"]);
    }

    #[test]
    fn fewer_than_top_k_returns_all() {
        assert_eq!(rank_top_k(vec![passage("a", 0.1, 0)], 5).len(), 1);
        assert!(rank_top_k(Vec::new(), 5).is_empty());
    }
}
