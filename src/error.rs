//! Error taxonomy.
//!
//! Only the kinds that are ever propagated as an `Err` get a variant here.
//! `NumericallyDegenerate` is deliberately absent: it is silently skipped,
//! never propagated as an error, and is instead represented by
//! [`crate::stats::StatsCell::is_degenerate`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MiningError {
    /// Attribute matrix, target vector and timestamp vector disagree in
    /// length, or an attribute column index is out of range.
    #[error("bad dataset shape: {0}")]
    BadShape(String),

    /// The dataset file named by the CLI could not be found.
    #[error("dataset not found: {0}")]
    MissingInput(String),

    /// A statistics or population buffer could not be allocated at its
    /// required dimensions.
    #[error("failed to allocate {buffer} ({dims})")]
    AllocationFailure { buffer: &'static str, dims: String },

    /// Per-trial or global rule pool capacity reached. Non-fatal: callers
    /// log this and stop appending rather than propagating it upward as a
    /// hard failure.
    #[error("rule pool exhausted ({0} rules)")]
    PoolExhausted(usize),

    /// Writer I/O failure on a rule or witness file.
    #[error("failed to emit {path}: {source}")]
    EmitterFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
