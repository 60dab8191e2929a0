//! Core domain types and logic.

pub mod config;
pub mod error;
pub mod portfolio;
pub mod signal;
pub mod simulator;
pub mod window;
