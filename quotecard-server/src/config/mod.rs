//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{net::SocketAddr, num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, Parser, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const LOCAL_CONFIG_BASENAME: &str = "quotecard";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ASSETS_ROOT: &str = "assets";
const DEFAULT_OUTPUT_DIR: &str = "static/generated";
const DEFAULT_OUTPUT_MAX_AGE_HOURS: u64 = 24;
const DEFAULT_OUTPUT_MAX_FILES: u64 = 100;
const DEFAULT_QUOTA_LIMIT: u64 = 5;
const DEFAULT_QUOTA_RESET_HOURS: u64 = 24;
const DEFAULT_QUOTES_TIMEOUT_SECS: u64 = 5;
const DEFAULT_QUOTES_CACHE_TTL_SECS: u64 = 3600;
pub(crate) const DEFAULT_ZENQUOTES_URL: &str = "https://zenquotes.io/api/random";
pub(crate) const DEFAULT_TYPE_FIT_URL: &str = "https://type.fit/api/quotes";
pub(crate) const DEFAULT_STOIC_URL: &str = "https://stoic-api.herokuapp.com/api/quote";

/// Command-line arguments for the quotecard server.
#[derive(Debug, Parser)]
#[command(name = "quotecard-server", version, about = "Quote card HTTP server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "QUOTECARD_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ServeOverrides,
}

/// Flags that override file and environment settings.
#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Override the listener port.
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the assets root (`backgrounds/` and `fonts/` live below it).
    #[arg(long = "assets-root", value_name = "PATH")]
    pub assets_root: Option<PathBuf>,

    /// Override the directory generated cards are written to.
    #[arg(long = "output-dir", value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Serve built-in quotes only; never call upstream quote APIs.
    #[arg(long = "offline", action = clap::ArgAction::SetTrue)]
    pub offline: bool,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub assets: AssetSettings,
    pub output: OutputSettings,
    pub quota: QuotaSettings,
    pub quotes: QuoteSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct AssetSettings {
    pub root: PathBuf,
    pub system_fonts: bool,
    pub watermark_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub max_age: Duration,
    pub max_files: usize,
}

#[derive(Debug, Clone)]
pub struct QuotaSettings {
    pub limit: NonZeroU32,
    pub reset_after: Duration,
}

#[derive(Debug, Clone)]
pub struct QuoteSettings {
    pub fetch: bool,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub zenquotes_url: String,
    pub type_fit_url: String,
    pub stoic_url: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("QUOTECARD").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);
    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    assets: RawAssetSettings,
    output: RawOutputSettings,
    quota: RawQuotaSettings,
    quotes: RawQuoteSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.port {
            self.server.port = Some(port);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(root) = overrides.assets_root.as_ref() {
            self.assets.root = Some(root.clone());
        }
        if let Some(dir) = overrides.output_dir.as_ref() {
            self.output.directory = Some(dir.clone());
        }
        if overrides.offline {
            self.quotes.fetch = Some(false);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            assets,
            output,
            quota,
            quotes,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            assets: build_asset_settings(assets),
            output: build_output_settings(output)?,
            quota: build_quota_settings(quota)?,
            quotes: build_quote_settings(quotes)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }
    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;
    Ok(ServerSettings { addr })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_asset_settings(assets: RawAssetSettings) -> AssetSettings {
    let watermark_text = assets.watermark_text.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });
    AssetSettings {
        root: assets
            .root
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_ROOT)),
        system_fonts: assets.system_fonts.unwrap_or(true),
        watermark_text,
    }
}

fn build_output_settings(output: RawOutputSettings) -> Result<OutputSettings, LoadError> {
    let directory = output
        .directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let max_age_hours = output.max_age_hours.unwrap_or(DEFAULT_OUTPUT_MAX_AGE_HOURS);
    if max_age_hours == 0 {
        return Err(LoadError::invalid(
            "output.max_age_hours",
            "must be greater than zero",
        ));
    }

    let max_files = output.max_files.unwrap_or(DEFAULT_OUTPUT_MAX_FILES);
    if max_files == 0 {
        return Err(LoadError::invalid(
            "output.max_files",
            "must be greater than zero",
        ));
    }
    let max_files: usize = max_files
        .try_into()
        .map_err(|_| LoadError::invalid("output.max_files", "value exceeds usize"))?;

    Ok(OutputSettings {
        directory,
        max_age: hours(max_age_hours),
        max_files,
    })
}

fn build_quota_settings(quota: RawQuotaSettings) -> Result<QuotaSettings, LoadError> {
    let limit = non_zero_u32(quota.limit.unwrap_or(DEFAULT_QUOTA_LIMIT), "quota.limit")?;
    let reset_hours = quota.reset_hours.unwrap_or(DEFAULT_QUOTA_RESET_HOURS);
    if reset_hours == 0 {
        return Err(LoadError::invalid(
            "quota.reset_hours",
            "must be greater than zero",
        ));
    }
    Ok(QuotaSettings {
        limit,
        reset_after: hours(reset_hours),
    })
}

fn build_quote_settings(quotes: RawQuoteSettings) -> Result<QuoteSettings, LoadError> {
    let timeout_secs = quotes.timeout_seconds.unwrap_or(DEFAULT_QUOTES_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "quotes.timeout_seconds",
            "must be greater than zero",
        ));
    }
    let cache_ttl_secs = quotes
        .cache_ttl_seconds
        .unwrap_or(DEFAULT_QUOTES_CACHE_TTL_SECS);

    Ok(QuoteSettings {
        fetch: quotes.fetch.unwrap_or(true),
        timeout: Duration::from_secs(timeout_secs),
        cache_ttl: Duration::from_secs(cache_ttl_secs),
        zenquotes_url: quotes
            .zenquotes_url
            .unwrap_or_else(|| DEFAULT_ZENQUOTES_URL.to_string()),
        type_fit_url: quotes
            .type_fit_url
            .unwrap_or_else(|| DEFAULT_TYPE_FIT_URL.to_string()),
        stoic_url: quotes
            .stoic_url
            .unwrap_or_else(|| DEFAULT_STOIC_URL.to_string()),
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAssetSettings {
    root: Option<PathBuf>,
    system_fonts: Option<bool>,
    watermark_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawOutputSettings {
    directory: Option<PathBuf>,
    max_age_hours: Option<u64>,
    max_files: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawQuotaSettings {
    limit: Option<u64>,
    reset_hours: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawQuoteSettings {
    fetch: Option<bool>,
    timeout_seconds: Option<u64>,
    cache_ttl_seconds: Option<u64>,
    zenquotes_url: Option<String>,
    type_fit_url: Option<String>,
    stoic_url: Option<String>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    let value_u32: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for u32"))?;
    NonZeroU32::new(value_u32).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

fn hours(value: u64) -> Duration {
    Duration::from_secs(value.saturating_mul(3600))
}

#[cfg(test)]
#[path = "../../tests/unit/config.rs"]
mod tests;
