use std::f64::consts::PI;

use proptest::prelude::*;
use qrerank_quantum::{
    build_circuit, encode_angles, fidelity, StateSimulator, Statevector, StatevectorSimulator,
};

fn simulate(angles: &[f64]) -> Statevector {
    StatevectorSimulator::new()
        .simulate(&build_circuit(angles).unwrap())
        .unwrap()
}

fn arb_angles(k: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=PI, k)
}

// ── Simulated states are normalized ──────────────────────────────────────

proptest! {
    #[test]
    fn simulated_states_are_unit_norm(angles in (1usize..=8).prop_flat_map(arb_angles)) {
        let s = simulate(&angles);
        prop_assert_eq!(s.len(), 1usize << angles.len());
        prop_assert!((s.norm() - 1.0).abs() < 1e-9);
    }
}

// ── Self-fidelity is one ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn self_fidelity_is_one(angles in arb_angles(6)) {
        let s = simulate(&angles);
        let f = fidelity(&s, &s).unwrap();
        prop_assert!((f - 1.0).abs() < 1e-6, "self fidelity {}", f);
    }
}

// ── Fidelity is symmetric and bounded ────────────────────────────────────

proptest! {
    #[test]
    fn fidelity_is_symmetric_and_bounded(a in arb_angles(6), b in arb_angles(6)) {
        let sa = simulate(&a);
        let sb = simulate(&b);
        let ab = fidelity(&sa, &sb).unwrap();
        let ba = fidelity(&sb, &sa).unwrap();
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - ba).abs() < 1e-12);
    }
}

// ── Angles stay in [0, π] ────────────────────────────────────────────────

proptest! {
    #[test]
    fn encoded_angles_stay_in_range(
        rows in prop::collection::vec((-1e6f64..1e6, -10.0f64..10.0, 0.0f64..10.0), 1..12),
    ) {
        let reduced: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let mins: Vec<f64> = rows.iter().map(|r| r.1).collect();
        let maxs: Vec<f64> = rows.iter().map(|r| r.1 + r.2).collect();
        let angles = encode_angles(&reduced, &mins, &maxs).unwrap();
        prop_assert_eq!(angles.len(), reduced.len());
        for a in angles {
            prop_assert!((0.0..=PI).contains(&a));
        }
    }
}

// ── Encoding is monotone per dimension ───────────────────────────────────

proptest! {
    #[test]
    fn angle_encoding_is_monotone(x in -5.0f64..5.0, y in -5.0f64..5.0) {
        let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
        let a = encode_angles(&[lo], &[-3.0], &[3.0]).unwrap()[0];
        let b = encode_angles(&[hi], &[-3.0], &[3.0]).unwrap()[0];
        prop_assert!(a <= b);
    }
}
