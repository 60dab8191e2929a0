//! Configuration access port trait.
//!
//! Absent keys are `Ok(None)`; a present key that does not parse as the
//! requested type is an error rather than a silent default.

use crate::domain::error::CrossoverError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_count(&self, section: &str, key: &str) -> Result<Option<usize>, CrossoverError>;
    fn get_amount(&self, section: &str, key: &str) -> Result<Option<f64>, CrossoverError>;
}
