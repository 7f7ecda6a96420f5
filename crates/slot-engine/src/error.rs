//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A local clock string could not be parsed, or a timezone identifier is
    /// not in the IANA database. Treat as a configuration error; retrying with
    /// the same input fails the same way.
    #[error("Invalid time specification: {0}")]
    InvalidTimeSpecification(String),

    #[error("Invalid booking policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
