use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;

use autoquiz::config::Config;
use autoquiz::logging::{init_logging, LogConfig, LogFormat};
use autoquiz::quiz::QuizClient;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()
        .context("invalid configuration")?
        .with_api_url(cli.api_url.as_deref())
        .with_timeout(cli.timeout);
    let client = QuizClient::from_config(&config);
    tracing::debug!(api_url = %config.api_url, "using quiz API");

    match cli.command {
        Command::List { status } => commands::run_list(&client, status),
        Command::Show { id } => commands::run_show(&client, &id),
        Command::Create { path } => commands::run_create(&client, &path),
        Command::FromText { input, title } => {
            commands::run_from_text(&client, &input, title.as_deref())
        }
        Command::FromFile { path, title } => {
            commands::run_from_file(&client, &path, title.as_deref())
        }
        Command::Approve { id, recipients } => commands::run_approve(&client, &id, &recipients),
        Command::Delete { ids } => commands::run_delete(&client, &ids),
        Command::Export { id, output_dir } => commands::run_export(&client, &id, &output_dir),
        Command::FormQuestions { form_id } => commands::run_form_questions(&client, &form_id),
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = io::stderr().is_terminal();
    config
}
