//! Fixed-value demonstration
//!
//! Runs every formula on one set of inputs, without prompting.

use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::formulas::{CalculationKind, CalculationRequest};

pub const DEFAULT_AMOUNT: f64 = 1000.0;
pub const DEFAULT_RATE: f64 = 0.05;
pub const DEFAULT_TIME: f64 = 5.0;

/// One formula's output in a demonstration run
#[derive(Debug, Clone, Serialize)]
pub struct DemoEntry {
    pub kind: CalculationKind,
    pub label: &'static str,
    pub value: f64,
}

/// All four formulas evaluated on the same inputs
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub amount: f64,
    pub rate: f64,
    pub time: f64,
    pub results: Vec<DemoEntry>,
}

impl DemoReport {
    pub fn value_of(&self, kind: CalculationKind) -> Option<f64> {
        self.results.iter().find(|e| e.kind == kind).map(|e| e.value)
    }

    /// Plain-text rendering
    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Finance Calculator demonstration")?;
        writeln!(out, "================================\n")?;
        writeln!(out, "  Amount: {:.2}", self.amount)?;
        writeln!(out, "  Rate:   {}", self.rate)?;
        writeln!(out, "  Time:   {}", self.time)?;
        writeln!(out)?;
        for entry in &self.results {
            writeln!(out, "{:<18} {:>14.2}", format!("{}:", entry.label), entry.value)?;
        }
        Ok(())
    }

    /// Pretty JSON rendering
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Evaluate every formula on `amount`, `rate` and `time`
pub fn run(amount: f64, rate: f64, time: f64) -> DemoReport {
    let results = CalculationKind::ALL
        .into_iter()
        .map(|kind| DemoEntry {
            kind,
            label: kind.label(),
            value: CalculationRequest::new(kind, amount, rate, time).evaluate(),
        })
        .collect();

    DemoReport {
        amount,
        rate,
        time,
        results,
    }
}
