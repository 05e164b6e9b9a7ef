//! Configuration validation.
//!
//! Validates all config fields before any ticker is run.

use crate::domain::error::SentraderError;
use crate::domain::strategy::{
    DEFAULT_BASE_PERCENT, DEFAULT_LONG_PERIOD, DEFAULT_SENTIMENT_SCALE, DEFAULT_SHORT_PERIOD,
};
use crate::domain::universe::parse_codes;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    validate_data_sources(config)?;
    validate_backtest_config(config)?;
    validate_strategy_config(config)?;
    Ok(())
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    validate_initial_capital(config)?;
    validate_dates(config)?;
    validate_tickers(config)?;
    validate_max_tickers(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    validate_periods(config)?;
    validate_base_percent(config)?;
    validate_sentiment_scale(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> SentraderError {
    SentraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a present value, or fall back to `default` when the key is absent.
fn parse_or<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, SentraderError> {
    match config.get_string(section, key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            invalid(
                section,
                key,
                &format!("{} must be {}, got '{}'", key, expected, raw.trim()),
            )
        }),
    }
}

fn validate_data_sources(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    match config.get_string("data", "price_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SentraderError::ConfigMissing {
            section: "data".to_string(),
            key: "price_dir".to_string(),
        }),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    let value: f64 = parse_or(config, "backtest", "initial_capital", 0.0, "a number")?;
    if !(value > 0.0) || !value.is_finite() {
        return Err(invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be positive",
        ));
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if end_date < start_date {
        return Err(invalid(
            "backtest",
            "end_date",
            "end_date must not be before start_date",
        ));
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, SentraderError> {
    match value {
        None => Err(SentraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
            invalid(
                "backtest",
                field,
                &format!("invalid {} format, expected YYYY-MM-DD", field),
            )
        }),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    match config.get_string("backtest", "tickers") {
        Some(list) => parse_codes(&list)
            .map(|_| ())
            .map_err(|e| invalid("backtest", "tickers", &e.to_string())),
        None => Ok(()),
    }
}

fn validate_max_tickers(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    if config.get_string("backtest", "max_tickers").is_none() {
        return Ok(());
    }
    let value: i64 = parse_or(config, "backtest", "max_tickers", 0, "an integer")?;
    if value < 1 {
        return Err(invalid(
            "backtest",
            "max_tickers",
            "max_tickers must be at least 1",
        ));
    }
    Ok(())
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    let short: i64 = parse_or(
        config,
        "strategy",
        "short_period",
        DEFAULT_SHORT_PERIOD as i64,
        "an integer",
    )?;
    let long: i64 = parse_or(
        config,
        "strategy",
        "long_period",
        DEFAULT_LONG_PERIOD as i64,
        "an integer",
    )?;

    if short < 1 {
        return Err(invalid(
            "strategy",
            "short_period",
            "short_period must be at least 1",
        ));
    }
    if long <= short {
        return Err(invalid(
            "strategy",
            "long_period",
            "long_period must be greater than short_period",
        ));
    }
    Ok(())
}

fn validate_base_percent(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    let value: f64 = parse_or(
        config,
        "strategy",
        "base_percent",
        DEFAULT_BASE_PERCENT,
        "a number",
    )?;
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(
            "strategy",
            "base_percent",
            "base_percent must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_sentiment_scale(config: &dyn ConfigPort) -> Result<(), SentraderError> {
    let value: f64 = parse_or(
        config,
        "strategy",
        "sentiment_scale",
        DEFAULT_SENTIMENT_SCALE,
        "a number",
    )?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            "strategy",
            "sentiment_scale",
            "sentiment_scale must be a non-negative number",
        ));
    }
    Ok(())
}
