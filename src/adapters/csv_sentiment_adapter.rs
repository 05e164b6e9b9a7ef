//! Sentiment from a CSV of pre-scored headlines.
//!
//! Header `ticker,date,compound`; one row per headline with its compound
//! score in [-1, 1]. The score for a ticker over a date range is the mean
//! compound of its headlines in that range. Rows whose date does not parse
//! are dropped at load time.

use crate::domain::config_validation::DATE_FORMAT;
use crate::domain::error::SentraderError;
use crate::ports::sentiment_port::SentimentPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

const SOURCE: &str = "sentiment data";

#[derive(Debug, Deserialize)]
struct HeadlineRow {
    ticker: String,
    date: String,
    compound: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct ScoredHeadline {
    ticker: String,
    date: NaiveDate,
    compound: f64,
}

#[derive(Debug, Clone)]
pub struct CsvSentimentAdapter {
    headlines: Vec<ScoredHeadline>,
}

impl CsvSentimentAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SentraderError> {
        let path = path.as_ref();
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                SentraderError::upstream(SOURCE, format!("failed to open {}: {}", path.display(), e))
            })?;
        Self::from_reader(rdr)
    }

    pub fn from_string(content: &str) -> Result<Self, SentraderError> {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        Self::from_reader(rdr)
    }

    fn from_reader<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, SentraderError> {
        let mut headlines = Vec::new();
        let mut dropped = 0usize;

        for row in rdr.deserialize::<HeadlineRow>() {
            let row = row.map_err(|e| SentraderError::upstream(SOURCE, e.to_string()))?;
            match NaiveDate::parse_from_str(&row.date, DATE_FORMAT) {
                Ok(date) => headlines.push(ScoredHeadline {
                    ticker: row.ticker.to_uppercase(),
                    date,
                    compound: row.compound,
                }),
                Err(_) => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "sentiment rows with unparseable dates dropped");
        }

        Ok(Self { headlines })
    }

    pub fn headline_count(&self) -> usize {
        self.headlines.len()
    }
}

impl SentimentPort for CsvSentimentAdapter {
    fn fetch_sentiment(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<f64, SentraderError> {
        if end_date < start_date {
            return Err(SentraderError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        let ticker_upper = ticker.to_uppercase();
        let (sum, count) = self
            .headlines
            .iter()
            .filter(|h| h.ticker == ticker_upper && h.date >= start_date && h.date <= end_date)
            .fold((0.0_f64, 0usize), |(sum, count), h| (sum + h.compound, count + 1));

        if count == 0 {
            return Err(SentraderError::NoSentiment {
                ticker: ticker.to_string(),
                start: start_date,
                end: end_date,
            });
        }

        Ok(sum / count as f64)
    }
}
