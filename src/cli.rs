//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::csv_sentiment_adapter::CsvSentimentAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{parse_date, validate_config};
use crate::domain::error::SentraderError;
use crate::domain::strategy::{
    StrategyParams, DEFAULT_BASE_PERCENT, DEFAULT_LONG_PERIOD, DEFAULT_SENTIMENT_SCALE,
    DEFAULT_SHORT_PERIOD,
};
use crate::domain::universe::{parse_codes, run_universe, UniverseConfig, UniverseReport};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;
use crate::ports::sentiment_port::{NeutralSentiment, SentimentPort, UnavailableSentiment};

#[derive(Parser, Debug)]
#[command(
    name = "sentrader",
    about = "Compare a crossover strategy with and without sentiment-scaled sizing"
)]
pub struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run baseline and sentiment-adjusted backtests over the universe
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated tickers, overrides the config
        #[arg(short, long)]
        ticker: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run tickers one at a time
        #[arg(long)]
        sequential: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List tickers available in the price directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Install the stderr subscriber. `RUST_LOG` wins unless `verbose` is set.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sentrader=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentrader=info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Compare {
            config,
            ticker,
            output,
            sequential,
        } => run_compare(&config, ticker.as_deref(), output.as_deref(), sequential).map(|_| ()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SentraderError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(adapter)
}

/// Validate the config and turn it into run settings.
pub fn build_universe_config(config: &dyn ConfigPort) -> Result<UniverseConfig, SentraderError> {
    validate_config(config)?;

    let start_date = parse_date(
        config.get_string("backtest", "start_date").as_deref(),
        "start_date",
    )?;
    let end_date = parse_date(
        config.get_string("backtest", "end_date").as_deref(),
        "end_date",
    )?;

    let max_tickers = config
        .get_string("backtest", "max_tickers")
        .map(|_| config.get_int("backtest", "max_tickers", 1) as usize);

    Ok(UniverseConfig {
        start_date,
        end_date,
        initial_capital: config.get_double("backtest", "initial_capital", 0.0),
        params: StrategyParams {
            short_period: config.get_int("strategy", "short_period", DEFAULT_SHORT_PERIOD as i64)
                as usize,
            long_period: config.get_int("strategy", "long_period", DEFAULT_LONG_PERIOD as i64)
                as usize,
            base_percent: config.get_double("strategy", "base_percent", DEFAULT_BASE_PERCENT),
            sentiment_scale: config.get_double(
                "strategy",
                "sentiment_scale",
                DEFAULT_SENTIMENT_SCALE,
            ),
        },
        max_tickers,
        parallel: config.get_bool("backtest", "parallel", true),
    })
}

/// Command-line tickers, else the config list, else every symbol the data source has.
pub fn resolve_tickers(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
    data_port: &dyn DataPort,
) -> Result<Vec<String>, SentraderError> {
    if let Some(list) = ticker_override {
        return parse_codes(list).map_err(|e| SentraderError::ConfigInvalid {
            section: "command line".to_string(),
            key: "ticker".to_string(),
            reason: e.to_string(),
        });
    }

    if let Some(list) = config.get_string("backtest", "tickers") {
        return parse_codes(&list).map_err(|e| SentraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "tickers".to_string(),
            reason: e.to_string(),
        });
    }

    data_port.list_symbols()
}

/// Sentiment source from `[data] sentiment_file`. Without one every ticker is
/// scored neutral; a file that cannot be read leaves every ticker without sentiment.
pub fn load_sentiment(config: &dyn ConfigPort) -> Box<dyn SentimentPort> {
    let Some(path) = config
        .get_string("data", "sentiment_file")
        .filter(|p| !p.trim().is_empty())
    else {
        tracing::warn!("no sentiment_file configured, all tickers scored neutral");
        return Box::new(NeutralSentiment);
    };

    match CsvSentimentAdapter::from_file(path.trim()) {
        Ok(adapter) => {
            tracing::info!(
                path = %path,
                headlines = adapter.headline_count(),
                "sentiment loaded"
            );
            Box::new(adapter)
        }
        Err(e) => {
            tracing::warn!(error = %e, "sentiment file unreadable, no ticker will have sentiment");
            Box::new(UnavailableSentiment {
                reason: e.to_string(),
            })
        }
    }
}

fn price_dir(config: &dyn ConfigPort) -> Result<PathBuf, SentraderError> {
    config
        .get_string("data", "price_dir")
        .map(|p| PathBuf::from(p.trim()))
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| SentraderError::ConfigMissing {
            section: "data".to_string(),
            key: "price_dir".to_string(),
        })
}

/// Load, run and report. Errors with `NoResults` when every ticker was skipped.
pub fn run_compare(
    config_path: &Path,
    ticker_override: Option<&str>,
    output_override: Option<&Path>,
    sequential: bool,
) -> Result<UniverseReport, SentraderError> {
    let adapter = load_config(config_path)?;
    let mut universe_config = build_universe_config(&adapter)?;
    if sequential {
        universe_config.parallel = false;
    }

    let data_port = CsvAdapter::new(price_dir(&adapter)?);
    let tickers = resolve_tickers(ticker_override, &adapter, &data_port)?;
    let sentiment_port = load_sentiment(&adapter);

    let report = run_universe(
        &tickers,
        &data_port,
        sentiment_port.as_ref(),
        &universe_config,
    );

    print_summary(&report);

    if report.results.is_empty() {
        return Err(SentraderError::NoResults {
            attempted: report.attempted(),
        });
    }

    let output = output_override
        .map(Path::to_path_buf)
        .or_else(|| adapter.get_string("report", "output").map(PathBuf::from));
    if let Some(path) = output {
        CsvReportAdapter.write(&report, &path.to_string_lossy())?;
        eprintln!("\nReport written to: {}", path.display());
    }

    Ok(report)
}

fn print_summary(report: &UniverseReport) {
    eprintln!("\n=== Per-Ticker Comparison ===");
    for result in &report.results {
        let r = &result.record;
        let sign = if r.diff_value >= 0.0 { "+" } else { "" };
        let note = if result.sentiment_available { "" } else { " (no sentiment)" };
        eprintln!(
            "  {}:  old {:.2}  new {:.2}  diff {}{:.2}  sentiment {:.3}{}",
            r.ticker, r.old_value, r.new_value, sign, r.diff_value, r.sentiment, note,
        );
        tracing::debug!(
            ticker = %r.ticker,
            baseline_return = result.baseline_metrics.total_return,
            baseline_trades = result.baseline_metrics.total_trades,
            baseline_win_rate = result.baseline_metrics.win_rate,
            baseline_drawdown = result.baseline_metrics.max_drawdown,
            adjusted_return = result.adjusted_metrics.total_return,
            adjusted_trades = result.adjusted_metrics.total_trades,
            adjusted_win_rate = result.adjusted_metrics.win_rate,
            adjusted_drawdown = result.adjusted_metrics.max_drawdown,
            "run metrics"
        );
    }

    for failure in &report.failures {
        let kind = if failure.input_error { "bad input" } else { "unavailable" };
        eprintln!("  {}:  skipped, {} ({})", failure.ticker, kind, failure.reason);
    }

    let s = &report.summary;
    eprintln!("\n=== Universe Summary ===");
    eprintln!("Tickers compared: {} of {}", s.total, report.attempted());
    eprintln!(
        "Better with sentiment: {} ({:.1}%)",
        s.better_count,
        s.better_fraction * 100.0
    );
    eprintln!("Worse or equal:   {}", s.worse_count);
    eprintln!("Avg diff cash:    {:.2}", s.avg_diff_cash);
    eprintln!("Avg diff value:   {:.2}", s.avg_diff_value);
    eprintln!("Avg gain:         {:.2}", s.avg_gain);
    eprintln!("Avg loss:         {:.2}", s.avg_loss);
}

pub fn run_validate(config_path: &Path) -> Result<(), SentraderError> {
    let adapter = load_config(config_path)?;
    let universe_config = build_universe_config(&adapter)?;
    let p = &universe_config.params;

    eprintln!("Config valid: {}", config_path.display());
    eprintln!(
        "  period:   {} to {}",
        universe_config.start_date, universe_config.end_date
    );
    eprintln!("  capital:  {:.2}", universe_config.initial_capital);
    eprintln!("  averages: {} / {}", p.short_period, p.long_period);
    eprintln!(
        "  sizing:   {}% base, sentiment scale {}",
        p.base_percent, p.sentiment_scale
    );
    Ok(())
}

pub fn run_list_symbols(config_path: &Path) -> Result<(), SentraderError> {
    let adapter = load_config(config_path)?;
    let data_port = CsvAdapter::new(price_dir(&adapter)?);
    let symbols = data_port.list_symbols()?;

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    Ok(())
}
