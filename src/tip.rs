//!
//! Model for the tip calculator demo.
//!
//! Derived values are pure functions of the two inputs.
//! If an input is absent the result is absent.
//!

use crate::Binding;

/// Tip for the amount.
pub fn tip_value(amount: Option<f64>, rate: Option<f64>) -> Option<f64> {
    Some(amount? * rate?)
}

/// Amount plus tip.
pub fn total_value(amount: Option<f64>, tip: Option<f64>) -> Option<f64> {
    Some(amount? + tip?)
}

/// Inputs of the tip calculator.
#[derive(Debug, Clone)]
pub struct TipCalculator {
    pub amount: Binding,
    pub rate: Binding,
}

impl Default for TipCalculator {
    fn default() -> Self {
        Self {
            amount: Binding::new(Some(1.0)),
            rate: Binding::new(Some(1.0)),
        }
    }
}

impl TipCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tip.
    pub fn tip(&self) -> Option<f64> {
        tip_value(self.amount.get(), self.rate.get())
    }

    /// Current total.
    pub fn total(&self) -> Option<f64> {
        total_value(self.amount.get(), self.tip())
    }
}
