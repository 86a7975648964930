//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::cache_adapter::{CachingDataPort, DEFAULT_TTL};
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::analysis::{Analysis, AnalysisParams};
use crate::domain::error::StocklensError;
use crate::domain::market::{MarketInfo, detect_market};
use crate::domain::overlay::{self, Overlay};
use crate::domain::period::Lookback;
use crate::domain::series::Series;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::export_port::ExportPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stocklens", about = "Stock history analysis and export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a symbol and print a report
    Analyze {
        symbol: String,
        #[arg(short, long, default_value = "1y")]
        period: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a symbol's history to CSV
    Export {
        symbol: String,
        #[arg(short, long, default_value = "1y")]
        period: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        overlays: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the stored data range for a symbol
    Info {
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            symbol,
            period,
            config,
            json,
            output,
        } => run_analyze(&symbol, &period, config.as_ref(), json, output.as_ref()),
        Command::Export {
            symbol,
            period,
            config,
            overlays,
            output,
        } => run_export(&symbol, &period, config.as_ref(), overlays, output.as_ref()),
        Command::ListSymbols { config } => run_list_symbols(config.as_ref()),
        Command::Info { symbol, config } => run_info(&symbol, config.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StocklensError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn report_error(err: StocklensError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

/// Where to read bars from and whether fetches are memoized.
#[derive(Debug)]
pub struct DataSettings {
    pub dir: PathBuf,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            cache_enabled: true,
            cache_ttl: DEFAULT_TTL,
        }
    }
}

pub fn build_data_settings(config: &dyn ConfigPort) -> Result<DataSettings, StocklensError> {
    let defaults = DataSettings::default();
    let dir = config
        .get_string("data", "dir")
        .map(PathBuf::from)
        .unwrap_or(defaults.dir);
    let cache_enabled = config.get_bool("cache", "enabled", defaults.cache_enabled);
    let ttl_secs = config.get_int("cache", "ttl_secs", defaults.cache_ttl.as_secs() as i64);
    if ttl_secs < 0 {
        return Err(StocklensError::ConfigInvalid {
            section: "cache".into(),
            key: "ttl_secs".into(),
            reason: "must not be negative".into(),
        });
    }
    Ok(DataSettings {
        dir,
        cache_enabled,
        cache_ttl: Duration::from_secs(ttl_secs as u64),
    })
}

fn read_window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, StocklensError> {
    let raw = config.get_int("analysis", key, default as i64);
    usize::try_from(raw).map_err(|_| StocklensError::ConfigInvalid {
        section: "analysis".into(),
        key: key.into(),
        reason: "must not be negative".into(),
    })
}

pub fn build_analysis_params(config: &dyn ConfigPort) -> Result<AnalysisParams, StocklensError> {
    let defaults = AnalysisParams::default();
    let params = AnalysisParams {
        ma_short: read_window(config, "ma_short", defaults.ma_short)?,
        ma_long: read_window(config, "ma_long", defaults.ma_long)?,
        rsi_period: read_window(config, "rsi_period", defaults.rsi_period)?,
        bollinger_period: read_window(config, "bollinger_period", defaults.bollinger_period)?,
        bollinger_k: config.get_double("analysis", "bollinger_k", defaults.bollinger_k),
        macd_fast: read_window(config, "macd_fast", defaults.macd_fast)?,
        macd_slow: read_window(config, "macd_slow", defaults.macd_slow)?,
        macd_signal: read_window(config, "macd_signal", defaults.macd_signal)?,
        risk_free_rate: config.get_double("analysis", "risk_free_rate", defaults.risk_free_rate),
    };
    params.validate()?;
    Ok(params)
}

fn resolve_settings(
    config_path: Option<&PathBuf>,
) -> Result<(DataSettings, AnalysisParams), ExitCode> {
    match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = load_config(path)?;
            let settings = build_data_settings(&adapter).map_err(report_error)?;
            let params = build_analysis_params(&adapter).map_err(report_error)?;
            Ok((settings, params))
        }
        None => Ok((DataSettings::default(), AnalysisParams::default())),
    }
}

pub fn build_data_port(settings: &DataSettings) -> Box<dyn DataPort> {
    let csv = CsvAdapter::new(settings.dir.clone());
    if settings.cache_enabled {
        Box::new(CachingDataPort::new(csv, settings.cache_ttl))
    } else {
        Box::new(csv)
    }
}

pub fn analyze_symbol(
    data_port: &dyn DataPort,
    market: &MarketInfo,
    lookback: Lookback,
    params: &AnalysisParams,
    as_of: NaiveDate,
) -> Result<Analysis, StocklensError> {
    let series = data_port.fetch_series(&market.symbol, lookback)?;
    Ok(Analysis::compute(&series, params, as_of))
}

/// Overlay columns for an export: both moving averages, then the band pair.
pub fn build_overlays(series: &Series, params: &AnalysisParams) -> Vec<Overlay> {
    let bands = overlay::bollinger_bands(series, params.bollinger_period, params.bollinger_k);
    vec![
        overlay::moving_average(series, params.ma_short),
        overlay::moving_average(series, params.ma_long),
        bands.upper,
        bands.lower,
    ]
}

pub fn default_export_path(symbol: &str, today: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "{}_historical_data_{}.csv",
        symbol,
        today.format("%Y%m%d")
    ))
}

#[derive(Serialize)]
struct AnalysisDocument<'a> {
    market: &'a MarketInfo,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

fn write_json(
    analysis: &Analysis,
    market: &MarketInfo,
    output_path: Option<&PathBuf>,
) -> Result<(), StocklensError> {
    let doc = AnalysisDocument { market, analysis };
    let body = serde_json::to_string_pretty(&doc).map_err(|e| StocklensError::Data {
        reason: format!("JSON encoding failed: {e}"),
    })?;
    match output_path {
        Some(path) => fs::write(path, body + "\n")?,
        None => println!("{body}"),
    }
    Ok(())
}

fn write_report(
    analysis: &Analysis,
    market: &MarketInfo,
    output_path: Option<&PathBuf>,
) -> Result<(), StocklensError> {
    let adapter = TextReportAdapter::new();
    match output_path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            adapter.write(analysis, market, &mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            adapter.write(analysis, market, &mut lock)
        }
    }
}

fn run_analyze(
    symbol: &str,
    period: &str,
    config_path: Option<&PathBuf>,
    json: bool,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Resolve period and settings
    let lookback = match period.parse::<Lookback>() {
        Ok(l) => l,
        Err(e) => return report_error(e),
    };
    let (settings, params) = match resolve_settings(config_path) {
        Ok(v) => v,
        Err(code) => return code,
    };

    // Stage 2: Fetch and analyze
    let data_port = build_data_port(&settings);
    let market = detect_market(symbol);
    eprintln!(
        "Analyzing {} ({lookback}) from {}",
        market.symbol,
        settings.dir.display()
    );
    let analysis = match analyze_symbol(
        data_port.as_ref(),
        &market,
        lookback,
        &params,
        Local::now().date_naive(),
    ) {
        Ok(a) => a,
        Err(e) => return report_error(e),
    };
    eprintln!("Computed metrics over {} bars", analysis.bar_count);

    // Stage 3: Render
    let result = if json {
        write_json(&analysis, &market, output_path)
    } else {
        write_report(&analysis, &market, output_path)
    };
    match result {
        Ok(()) => {
            if let Some(path) = output_path {
                eprintln!("Report written to: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => report_error(e),
    }
}

fn run_export(
    symbol: &str,
    period: &str,
    config_path: Option<&PathBuf>,
    overlays: bool,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Resolve period and settings
    let lookback = match period.parse::<Lookback>() {
        Ok(l) => l,
        Err(e) => return report_error(e),
    };
    let (settings, params) = match resolve_settings(config_path) {
        Ok(v) => v,
        Err(code) => return code,
    };

    // Stage 2: Fetch
    let data_port = build_data_port(&settings);
    let market = detect_market(symbol);
    eprintln!(
        "Loading {} history ({lookback}) from {}",
        market.symbol,
        settings.dir.display()
    );
    let series = match data_port.fetch_series(&market.symbol, lookback) {
        Ok(s) => s,
        Err(e) => return report_error(e),
    };

    // Stage 3: Write the dataset
    let today = Local::now().date_naive();
    let output = output_path
        .cloned()
        .unwrap_or_else(|| default_export_path(&market.symbol, today));
    let overlay_columns = if overlays {
        build_overlays(&series, &params)
    } else {
        Vec::new()
    };

    let exporter = CsvExportAdapter::new(today);
    match exporter.write_history(&series, &market, &overlay_columns, &output) {
        Ok(()) => {
            eprintln!("Exported {} rows to: {}", series.len(), output.display());
            ExitCode::SUCCESS
        }
        Err(e) => report_error(e),
    }
}

fn run_list_symbols(config_path: Option<&PathBuf>) -> ExitCode {
    let (settings, _params) = match resolve_settings(config_path) {
        Ok(v) => v,
        Err(code) => return code,
    };
    let data_port = build_data_port(&settings);

    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => return report_error(e),
    };
    if symbols.is_empty() {
        eprintln!("No symbols found in {}", settings.dir.display());
    } else {
        for symbol in &symbols {
            println!("{symbol}");
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(symbol: &str, config_path: Option<&PathBuf>) -> ExitCode {
    let (settings, _params) = match resolve_settings(config_path) {
        Ok(v) => v,
        Err(code) => return code,
    };
    let data_port = build_data_port(&settings);
    let market = detect_market(symbol);

    match data_port.data_range(&market.symbol) {
        Ok(Some((first, last, count))) => {
            println!(
                "{} ({}, {}): {} bars, {} to {}",
                market.symbol, market.market, market.currency, count, first, last
            );
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", market.symbol);
            ExitCode::from(3)
        }
        Err(e) => report_error(e),
    }
}
