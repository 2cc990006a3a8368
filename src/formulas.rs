//! Closed-form interest, discounting and annuity formulas
//!
//! All four formulas take the same three inputs:
//! - an amount (principal, future value or present value depending on the formula)
//! - a periodic rate as a decimal (0.05 for 5%)
//! - a number of periods, which may be fractional
//!
//! The plain functions apply IEEE-754 arithmetic with no validation, so a zero
//! rate for an annuity yields NaN and a rate of -1 for present value yields
//! infinity. [`CalculationRequest::evaluate_checked`] rejects those inputs instead.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalcError, Result};

/// Amount after compounding: `principal * (1 + rate)^time`
pub fn compound_interest(principal: f64, rate: f64, time: f64) -> f64 {
    principal * (1.0 + rate).powf(time)
}

/// Amount after simple interest: `principal * (1 + rate * time)`
pub fn simple_interest(principal: f64, rate: f64, time: f64) -> f64 {
    principal * (1.0 + rate * time)
}

/// Discounted value of a future sum: `future_value / (1 + rate)^time`
pub fn present_value(future_value: f64, rate: f64, time: f64) -> f64 {
    future_value / (1.0 + rate).powf(time)
}

/// Level payment amortizing `present_value` over `time` periods
///
/// `present_value * rate / (1 - (1 + rate)^-time)`
pub fn annuity_payment(present_value: f64, rate: f64, time: f64) -> f64 {
    present_value * (rate / (1.0 - (1.0 + rate).powf(-time)))
}

/// Which formula a request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationKind {
    CompoundInterest,
    SimpleInterest,
    PresentValue,
    AnnuityPayment,
}

impl CalculationKind {
    /// Menu order
    pub const ALL: [CalculationKind; 4] = [
        CalculationKind::CompoundInterest,
        CalculationKind::SimpleInterest,
        CalculationKind::PresentValue,
        CalculationKind::AnnuityPayment,
    ];

    /// Label used when printing a result
    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::CompoundInterest => "Compound Interest",
            CalculationKind::SimpleInterest => "Simple Interest",
            CalculationKind::PresentValue => "Present Value",
            CalculationKind::AnnuityPayment => "Annuity Payment",
        }
    }

    /// Menu choice ("1".."4") for this kind
    pub fn menu_key(&self) -> &'static str {
        match self {
            CalculationKind::CompoundInterest => "1",
            CalculationKind::SimpleInterest => "2",
            CalculationKind::PresentValue => "3",
            CalculationKind::AnnuityPayment => "4",
        }
    }

    /// Map a menu choice back to a kind
    pub fn from_menu_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.menu_key() == key)
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One calculation built from user input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub kind: CalculationKind,
    /// Principal for the interest formulas, future value for present value,
    /// present value for the annuity payment
    pub amount: f64,
    pub rate: f64,
    pub time: f64,
}

impl CalculationRequest {
    pub fn new(kind: CalculationKind, amount: f64, rate: f64, time: f64) -> Self {
        Self {
            kind,
            amount,
            rate,
            time,
        }
    }

    /// Run the matching formula with raw floating-point semantics
    pub fn evaluate(&self) -> f64 {
        let (a, r, t) = (self.amount, self.rate, self.time);
        match self.kind {
            CalculationKind::CompoundInterest => compound_interest(a, r, t),
            CalculationKind::SimpleInterest => simple_interest(a, r, t),
            CalculationKind::PresentValue => present_value(a, r, t),
            CalculationKind::AnnuityPayment => annuity_payment(a, r, t),
        }
    }

    /// Run the matching formula, rejecting inputs outside its domain
    /// and any result that is not finite
    pub fn evaluate_checked(&self) -> Result<f64> {
        let kind = self.kind;

        for (name, value) in [("amount", self.amount), ("rate", self.rate), ("time", self.time)] {
            if !value.is_finite() {
                return Err(CalcError::domain(kind, format!("{} must be finite", name)));
            }
        }

        match kind {
            CalculationKind::CompoundInterest | CalculationKind::PresentValue
                if self.rate == -1.0 =>
            {
                return Err(CalcError::domain(kind, "rate of -1 leaves nothing to compound"));
            }
            CalculationKind::AnnuityPayment if self.rate == 0.0 => {
                return Err(CalcError::domain(kind, "rate must be non-zero for an annuity"));
            }
            CalculationKind::AnnuityPayment if self.time == 0.0 => {
                return Err(CalcError::domain(kind, "time must be non-zero for an annuity"));
            }
            _ => {}
        }

        let value = self.evaluate();
        if !value.is_finite() {
            return Err(CalcError::domain(kind, format!("result is not finite ({:?})", value)));
        }
        Ok(value)
    }
}
