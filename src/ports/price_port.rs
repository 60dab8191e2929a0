//! Price loading port trait.

use crate::domain::error::CrossoverError;

/// A source of closing prices in chronological order.
pub trait PriceSource {
    /// Read every value of `column`, in row order.
    fn load_prices(&self, column: &str) -> Result<Vec<f64>, CrossoverError>;
}
