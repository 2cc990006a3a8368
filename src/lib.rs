//! Finance Calculator - closed-form interest and annuity formulas
//!
//! This library provides:
//! - Compound interest, simple interest, present value and annuity payment formulas
//! - Checked evaluation that rejects degenerate rates and periods
//! - An interactive menu shell over any reader/writer pair
//! - A fixed-value demonstration report

pub mod error;
pub mod formulas;
pub mod shell;
pub mod demo;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use formulas::{
    annuity_payment, compound_interest, present_value, simple_interest, CalculationKind,
    CalculationRequest,
};
pub use shell::{SessionOutcome, Shell, ShellConfig};
pub use demo::DemoReport;
