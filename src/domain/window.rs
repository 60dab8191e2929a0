//! Fixed-capacity rolling window of recent prices.
//!
//! Bounded FIFO: pushing beyond capacity evicts the oldest observation.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        RollingWindow {
            capacity,
            values: VecDeque::new(),
        }
    }

    /// Append `value`, returning the evicted observation if the window was full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    /// Arithmetic mean of the current contents, `None` when empty.
    ///
    /// Summed oldest-first on every call rather than kept as a running total,
    /// so no rounding drift accumulates across evictions.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().sum();
        Some(sum / self.values.len() as f64)
    }
}
