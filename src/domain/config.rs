//! Simulation parameters.

use crate::domain::error::CrossoverError;

pub const DEFAULT_SHORT_WINDOW: usize = 5;
pub const DEFAULT_LONG_WINDOW: usize = 10;
pub const DEFAULT_INITIAL_BALANCE: f64 = 1000.0;
pub const DEFAULT_PRICE_COLUMN: &str = "Close";

/// Upper bound on either window length.
pub const MAX_WINDOW: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub short_window: usize,
    pub long_window: usize,
    pub initial_balance: f64,
    pub price_column: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            initial_balance: DEFAULT_INITIAL_BALANCE,
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), CrossoverError> {
        validate_window("short_window", self.short_window)?;
        validate_window("long_window", self.long_window)?;
        if !self.initial_balance.is_finite() || self.initial_balance <= 0.0 {
            return Err(invalid(
                "simulation",
                "initial_balance",
                "must be a positive number",
            ));
        }
        if self.price_column.trim().is_empty() {
            return Err(invalid("data", "price_column", "must not be empty"));
        }
        Ok(())
    }

    /// Observations needed before both windows are full.
    pub fn warmup_len(&self) -> usize {
        self.short_window.max(self.long_window)
    }
}

fn validate_window(key: &str, len: usize) -> Result<(), CrossoverError> {
    if len == 0 || len > MAX_WINDOW {
        return Err(CrossoverError::ConfigInvalid {
            section: "simulation".to_string(),
            key: key.to_string(),
            reason: format!("must be between 1 and {MAX_WINDOW}"),
        });
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> CrossoverError {
    CrossoverError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
