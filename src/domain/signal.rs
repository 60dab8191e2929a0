//! Binary crossover signal.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    Flat,
    Long,
}

impl Signal {
    /// Long only when the short average strictly exceeds the long average.
    /// Equal averages resolve to flat.
    pub fn from_averages(short_avg: f64, long_avg: f64) -> Self {
        if short_avg > long_avg {
            Signal::Long
        } else {
            Signal::Flat
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Flat => write!(f, "flat"),
            Signal::Long => write!(f, "long"),
        }
    }
}
