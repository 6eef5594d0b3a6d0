//! Error handling for the campaign data kit.
//!
//! Follows the layered pattern used across the codebase: one top-level
//! error with `#[from]` conversions from per-stage sub-enums, all built on
//! thiserror so messages carry the violated target.

use thiserror::Error;

/// Main error type for generation, assignment, and persistence.
#[derive(Error, Debug)]
pub enum DataKitError {
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("KYC assignment error: {0}")]
    Kyc(#[from] KycError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid generation spec: {reason}")]
    InvalidSpec { reason: String },
}

/// Identity generation failures. All fatal: downstream category counts
/// depend on the pool delivering exactly what was requested.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Rejection sampling hit its attempt bound before finding a fresh
    /// value, i.e. the vocabulary is too small for the requested count.
    #[error(
        "uniqueness pool exhausted for {field} after {attempts} attempts \
         ({generated} of {requested} identities generated)"
    )]
    Exhausted {
        field: &'static str,
        attempts: u32,
        generated: usize,
        requested: usize,
    },
}

/// Contribution allocation failures.
#[derive(Error, Debug)]
pub enum AllocationError {
    /// The exact-sum partition could not place the final amount inside
    /// `(0, cap]` within the retry bound.
    #[error(
        "exact-sum partition infeasible for category '{category}' after {attempts} attempts \
         (target total {target})"
    )]
    Infeasible {
        category: &'static str,
        attempts: u32,
        target: rust_decimal::Decimal,
    },

    /// The category spec asks for more donors than the caller supplied.
    #[error("category spec requires {required} donors but only {available} were supplied")]
    NotEnoughDonors { required: usize, available: usize },
}

/// KYC status assignment failures.
#[derive(Error, Debug)]
pub enum KycError {
    #[error(
        "requested {requested} KYC failures but only {available} non-contributing \
         identities are available"
    )]
    InsufficientPool { requested: usize, available: usize },
}

/// A persisted row that failed validation at the ingestion boundary.
///
/// Not an abort path: the loader skips the row, records one of these, and
/// keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// Table the row came from (`prospects`, `donors`, `kyc`).
    pub table: &'static str,
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub reason: String,
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} row {}: {}", self.table, self.row, self.reason)
    }
}
