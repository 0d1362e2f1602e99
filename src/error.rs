//! Error taxonomy for the calculation engine

use thiserror::Error;

/// Errors surfaced at the engine boundary
///
/// The engine either returns a fully populated result snapshot or one of
/// these; no partial results are ever exposed.
#[derive(Debug, Error)]
pub enum CalcError {
    /// Primary filer input failed validation (income missing or non-positive)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An injected rate table violated its invariants
    #[error("invalid rate table: {0}")]
    InvalidRateTable(String),

    /// Internal arithmetic produced an inconsistent result
    #[error("computation failed: {0}")]
    ComputationFailed(String),
}
