//! Error types for SlotDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SlotError
pub type Result<T> = std::result::Result<T, SlotError>;

/// Unified error type for SlotDB operations
#[derive(Debug, Error)]
pub enum SlotError {
    // -------------------------------------------------------------------------
    // Query Errors
    // -------------------------------------------------------------------------
    #[error("Invalid filter value {value:?} for column {column}: {reason}")]
    InvalidFilter {
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown column selector: {0}")]
    UnknownColumn(String),

    // -------------------------------------------------------------------------
    // Mutation Errors
    // -------------------------------------------------------------------------
    #[error("Record id 0 is reserved for deleted slots")]
    ReservedId,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Benchmark Errors
    // -------------------------------------------------------------------------
    #[error("Benchmark check failed: {0}")]
    BenchmarkMismatch(String),
}
