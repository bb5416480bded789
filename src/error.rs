//! Crate-level error type.
//!
//! Submission failures are deliberately *not* here: a rejected offer is a
//! renderable state (see `domain::offer::classify`), not an error the
//! caller propagates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] crate::shared::ArithmeticError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
