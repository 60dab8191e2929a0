#![allow(dead_code)]

use crossover::domain::config::SimulationConfig;
use crossover::domain::error::CrossoverError;
use crossover::ports::price_port::PriceSource;
use std::cell::Cell;
use std::collections::HashMap;

pub struct MockPriceSource {
    pub columns: HashMap<String, Vec<f64>>,
    pub calls: Cell<usize>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    pub fn with_column(mut self, name: &str, prices: Vec<f64>) -> Self {
        self.columns.insert(name.to_string(), prices);
        self
    }
}

impl PriceSource for MockPriceSource {
    fn load_prices(&self, column: &str) -> Result<Vec<f64>, CrossoverError> {
        self.calls.set(self.calls.get() + 1);
        self.columns
            .get(column)
            .cloned()
            .ok_or_else(|| CrossoverError::DataFormat {
                reason: format!("missing column {column:?} in header"),
            })
    }
}

pub fn default_config() -> SimulationConfig {
    SimulationConfig::default()
}

/// Nine tens followed by a twenty: a single buy on the tenth observation.
pub fn jump_prices() -> Vec<f64> {
    let mut prices = vec![10.0; 9];
    prices.push(20.0);
    prices
}

/// CSV text with `Date` and `Close` columns for `prices`.
pub fn close_csv(prices: &[f64]) -> String {
    let mut out = String::from("Date,Open,Close\n");
    for (i, p) in prices.iter().enumerate() {
        out.push_str(&format!("2024-01-{:02},{p},{p}\n", i + 1));
    }
    out
}
