//! Moving-average indicators over closing prices.

pub mod sma;

pub use sma::RollingSma;
