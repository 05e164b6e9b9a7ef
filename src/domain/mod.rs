//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod signal;
pub mod sizing;
pub mod position;
pub mod portfolio;
pub mod execution;
pub mod strategy;
pub mod backtest;
pub mod comparison;
pub mod metrics;
pub mod universe;
pub mod config_validation;
pub mod error;
