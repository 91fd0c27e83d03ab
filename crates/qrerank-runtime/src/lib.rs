//! # qrerank-runtime
//!
//! Startup and request entry point. Loads configuration, installs tracing,
//! loads the artifact directory all-or-nothing, and serves
//! `full_pipeline` with every call recorded in the query log.

pub mod runtime;

pub use runtime::{QrerankRuntime, RuntimeOptions};
