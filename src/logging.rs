//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; the binary installs the subscriber once at
//! startup. `RUST_LOG` takes precedence over the configured level.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Honour `RUST_LOG` when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub with_target: bool,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            with_target: false,
            format: LogFormat::default(),
        }
    }
}

/// Installs the global subscriber writing to stderr.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    init_logging_with_writer(config, io::stderr)
}

fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> anyhow::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(config.with_target);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .without_time();
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .without_time();
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
    }
    Ok(())
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || {
        // other crates (ureq, rustls) stay at warn
        let level = config.level_filter.to_string().to_lowercase();
        EnvFilter::new(format!("warn,autoquiz={}", level))
    };

    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
