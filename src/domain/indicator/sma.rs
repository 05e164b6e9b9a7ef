//! Simple Moving Average over closing prices.
//!
//! SMA(n)[i] = (C[i-n+1] + ... + C[i]) / n
//! Warmup: first (n-1) bars are invalid.

use std::collections::VecDeque;

/// Incremental SMA that only ever sees bars already delivered to it.
#[derive(Debug, Clone)]
pub struct RollingSma {
    period: usize,
    window: VecDeque<f64>,
}

impl RollingSma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::with_capacity(period),
        }
    }

    /// Push the next close and return the average once the window is full.
    pub fn update(&mut self, close: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }
        if self.window.len() == self.period {
            self.window.pop_front();
        }
        self.window.push_back(close);
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.period == 0 || self.window.len() < self.period {
            return None;
        }
        // Summed fresh each bar so identical windows give identical averages.
        Some(self.window.iter().sum::<f64>() / self.period as f64)
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_warmup() {
        let mut sma = RollingSma::new(3);
        assert_eq!(sma.update(10.0), None);
        assert_eq!(sma.update(20.0), None);
        assert_eq!(sma.value(), None);
        assert_eq!(sma.update(30.0), Some(20.0));
        assert_eq!(sma.value(), Some(20.0));
    }

    #[test]
    fn rolling_window_slides() {
        let mut sma = RollingSma::new(3);
        for close in [10.0, 20.0, 30.0] {
            sma.update(close);
        }
        assert_eq!(sma.update(40.0), Some(30.0));
        assert_eq!(sma.update(50.0), Some(40.0));
    }

    #[test]
    fn rolling_period_1_tracks_close() {
        let mut sma = RollingSma::new(1);
        assert_eq!(sma.update(7.5), Some(7.5));
        assert_eq!(sma.update(9.0), Some(9.0));
    }

    #[test]
    fn rolling_period_0_never_ready() {
        let mut sma = RollingSma::new(0);
        assert_eq!(sma.update(7.5), None);
        assert_eq!(sma.value(), None);
    }

    #[test]
    fn reset_clears_window() {
        let mut sma = RollingSma::new(2);
        sma.update(1.0);
        sma.update(3.0);
        sma.reset();
        assert_eq!(sma.value(), None);
        assert_eq!(sma.update(5.0), None);
        assert_eq!(sma.update(7.0), Some(6.0));
    }

    #[test]
    fn equal_windows_give_identical_averages() {
        let prices = [0.1, 0.7, 0.2, 0.1, 0.7, 0.2];
        let mut sma = RollingSma::new(3);
        let values: Vec<_> = prices.iter().filter_map(|&p| sma.update(p)).collect();
        assert_eq!(values[0].to_bits(), values[3].to_bits());
    }
}
