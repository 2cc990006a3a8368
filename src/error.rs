//! Error types for the calculator

use thiserror::Error;

use crate::formulas::CalculationKind;

/// Message shown when a numeric prompt receives non-numeric text
pub const INPUT_FORMAT_MESSAGE: &str = "Please enter numbers or decimal numbers only!";

/// Errors raised while collecting input or evaluating a calculation
#[derive(Error, Debug)]
pub enum CalcError {
    /// A numeric prompt received text that is not a decimal number
    #[error("{field} must be a number, got {input:?}")]
    InputFormat {
        /// Which prompt the text was entered at
        field: &'static str,
        /// The raw text as typed (trimmed)
        input: String,
    },

    /// Checked evaluation rejected the inputs or the result
    #[error("{reason}")]
    Domain {
        kind: CalculationKind,
        reason: String,
    },

    /// Console read or write failure
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failure
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    pub(crate) fn domain(kind: CalculationKind, reason: impl Into<String>) -> Self {
        CalcError::Domain {
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
