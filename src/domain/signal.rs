//! Moving-average crossover signal.
//!
//! Feeds each close into a short and a long [`RollingSma`] and reports when the
//! sign of `short - long` flips. Only bars already fed are ever consulted.

use crate::domain::error::SentraderError;
use crate::domain::indicator::RollingSma;
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// At least one average is not yet defined.
    Warmup,
    /// Both averages defined, no crossover on this bar.
    Hold,
    /// Short average crossed above the long average on this bar.
    Bullish,
    /// Short average crossed below the long average on this bar.
    Bearish,
}

#[derive(Debug, Clone)]
pub struct SignalGenerator {
    short: RollingSma,
    long: RollingSma,
    prior_diff_sign: Option<i8>,
    short_avg: Option<f64>,
    long_avg: Option<f64>,
}

impl SignalGenerator {
    pub fn new(short_period: usize, long_period: usize) -> Result<Self, SentraderError> {
        if short_period == 0 {
            return Err(SentraderError::ConfigInvalid {
                section: "strategy".into(),
                key: "short_period".into(),
                reason: "short_period must be at least 1".into(),
            });
        }
        if short_period >= long_period {
            return Err(SentraderError::ConfigInvalid {
                section: "strategy".into(),
                key: "long_period".into(),
                reason: format!(
                    "long_period ({long_period}) must be greater than short_period ({short_period})"
                ),
            });
        }

        Ok(Self {
            short: RollingSma::new(short_period),
            long: RollingSma::new(long_period),
            prior_diff_sign: None,
            short_avg: None,
            long_avg: None,
        })
    }

    pub fn update(&mut self, bar: &OhlcvBar) -> Signal {
        self.short_avg = self.short.update(bar.close);
        self.long_avg = self.long.update(bar.close);

        let (Some(short_avg), Some(long_avg)) = (self.short_avg, self.long_avg) else {
            return Signal::Warmup;
        };

        let sign = diff_sign(short_avg - long_avg);
        let signal = match self.prior_diff_sign {
            None => Signal::Hold,
            Some(prior) if prior <= 0 && sign > 0 => Signal::Bullish,
            Some(prior) if prior >= 0 && sign < 0 => Signal::Bearish,
            Some(_) => Signal::Hold,
        };

        // A tie keeps the last non-zero sign so that -,0,- is not a cross.
        if sign != 0 || self.prior_diff_sign.is_none() {
            self.prior_diff_sign = Some(sign);
        }

        signal
    }

    pub fn short_avg(&self) -> Option<f64> {
        self.short_avg
    }

    pub fn long_avg(&self) -> Option<f64> {
        self.long_avg
    }

    pub fn prior_diff_sign(&self) -> Option<i8> {
        self.prior_diff_sign
    }

    pub fn reset(&mut self) {
        self.short.reset();
        self.long.reset();
        self.prior_diff_sign = None;
        self.short_avg = None;
        self.long_avg = None;
    }
}

fn diff_sign(diff: f64) -> i8 {
    if diff > 0.0 {
        1
    } else if diff < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                ticker: "TEST".into(),
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    fn signals(prices: &[f64], short: usize, long: usize) -> Vec<Signal> {
        let mut generator = SignalGenerator::new(short, long).unwrap();
        make_bars(prices)
            .iter()
            .map(|bar| generator.update(bar))
            .collect()
    }

    fn v_shape() -> Vec<f64> {
        let mut prices: Vec<f64> = (0..30).map(|i| 100.0 - 50.0 * i as f64 / 29.0).collect();
        prices.extend((0..30).map(|j| 50.0 + 100.0 * (j + 1) as f64 / 30.0));
        prices
    }

    #[test]
    fn rejects_zero_short_period() {
        assert!(matches!(
            SignalGenerator::new(0, 5),
            Err(SentraderError::ConfigInvalid { ref key, .. }) if key == "short_period"
        ));
    }

    #[test]
    fn rejects_short_not_less_than_long() {
        assert!(SignalGenerator::new(5, 5).is_err());
        assert!(SignalGenerator::new(6, 5).is_err());
        assert!(SignalGenerator::new(1, 2).is_ok());
    }

    #[test]
    fn warmup_until_long_window_full() {
        let s = signals(&[10.0, 11.0, 12.0, 13.0], 2, 3);
        assert_eq!(s[0], Signal::Warmup);
        assert_eq!(s[1], Signal::Warmup);
        assert_eq!(s[2], Signal::Hold);
        assert_eq!(s[3], Signal::Hold);
    }

    #[test]
    fn first_defined_bar_never_fires() {
        let mut generator = SignalGenerator::new(1, 2).unwrap();
        let bars = make_bars(&[10.0, 12.0]);
        assert_eq!(generator.update(&bars[0]), Signal::Warmup);
        assert_eq!(generator.update(&bars[1]), Signal::Hold);
        assert_eq!(generator.prior_diff_sign(), Some(1));
    }

    #[test]
    fn bullish_then_bearish() {
        // SMA(1) - SMA(2) has the sign of the bar-to-bar change.
        let s = signals(&[10.0, 9.0, 8.0, 12.0, 15.0, 11.0], 1, 2);
        assert_eq!(
            s,
            vec![
                Signal::Warmup,
                Signal::Hold,
                Signal::Hold,
                Signal::Bullish,
                Signal::Hold,
                Signal::Bearish,
            ]
        );
    }

    #[test]
    fn tie_bar_does_not_fire() {
        // diffs: -, 0, +
        let s = signals(&[10.0, 9.0, 9.0, 11.0], 1, 2);
        assert_eq!(s[2], Signal::Hold);
        assert_eq!(s[3], Signal::Bullish);
    }

    #[test]
    fn touch_without_cross_does_not_fire() {
        // diffs: -, 0, -
        let s = signals(&[10.0, 9.0, 9.0, 8.0], 1, 2);
        assert!(s.iter().all(|sig| !matches!(sig, Signal::Bullish | Signal::Bearish)));
    }

    #[test]
    fn tie_then_drop_after_rise_is_bearish() {
        // diffs: +, 0, -
        let s = signals(&[10.0, 11.0, 11.0, 10.0], 1, 2);
        assert_eq!(s[2], Signal::Hold);
        assert_eq!(s[3], Signal::Bearish);
    }

    #[test]
    fn first_defined_tie_then_rise_is_bullish() {
        // diffs: 0, +
        let s = signals(&[10.0, 10.0, 12.0], 1, 2);
        assert_eq!(s[1], Signal::Hold);
        assert_eq!(s[2], Signal::Bullish);
    }

    #[test]
    fn linear_rise_has_no_crossover() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + 40.0 * i as f64 / 39.0).collect();
        let s = signals(&prices, 15, 30);
        assert!(s.iter().all(|sig| matches!(sig, Signal::Warmup | Signal::Hold)));
        assert_eq!(s.iter().filter(|sig| **sig == Signal::Warmup).count(), 29);
    }

    #[test]
    fn v_shape_fires_one_bullish_at_first_sign_change() {
        let prices = v_shape();
        let s = signals(&prices, 5, 15);

        let bullish: Vec<usize> = s
            .iter()
            .enumerate()
            .filter(|(_, sig)| **sig == Signal::Bullish)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(bullish.len(), 1);
        assert!(s.iter().all(|sig| *sig != Signal::Bearish));

        // Trailing means computed straight from the closes.
        let mean = |i: usize, n: usize| prices[i + 1 - n..=i].iter().sum::<f64>() / n as f64;
        let first_above = (15..prices.len())
            .find(|&i| mean(i, 5) > mean(i, 15))
            .unwrap();
        assert_eq!(bullish[0], first_above);
        assert!(first_above >= 30, "crossover must be on the rising leg");
    }

    #[test]
    fn averages_exposed_after_update() {
        let mut generator = SignalGenerator::new(1, 2).unwrap();
        let bars = make_bars(&[10.0, 20.0]);
        generator.update(&bars[0]);
        assert_eq!(generator.short_avg(), Some(10.0));
        assert_eq!(generator.long_avg(), None);
        generator.update(&bars[1]);
        assert_eq!(generator.short_avg(), Some(20.0));
        assert_eq!(generator.long_avg(), Some(15.0));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut generator = SignalGenerator::new(1, 2).unwrap();
        for bar in make_bars(&[10.0, 9.0, 12.0]) {
            generator.update(&bar);
        }
        generator.reset();
        assert_eq!(generator.prior_diff_sign(), None);
        assert_eq!(generator.short_avg(), None);

        let bars = make_bars(&[10.0, 9.0, 12.0]);
        let again: Vec<_> = bars.iter().map(|b| generator.update(b)).collect();
        assert_eq!(again, vec![Signal::Warmup, Signal::Hold, Signal::Bullish]);
    }
}
