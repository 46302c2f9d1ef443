//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "autoquiz",
    version,
    about = "Create, review, approve and delete AutoQuiz quizzes",
    long_about = "Command-line client for the AutoQuiz API.\n\n\
                  The API location is read from AUTOQUIZ_API_URL (or a .env file)\n\
                  and defaults to http://localhost:8000."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Base URL of the quiz API (overrides AUTOQUIZ_API_URL).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides AUTOQUIZ_TIMEOUT_SECS).
    #[arg(
        long = "timeout",
        value_name = "SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List quizzes, optionally filtered by status.
    List {
        #[arg(long = "status", value_enum, default_value = "all")]
        status: StatusArg,
    },

    /// Show a quiz with its questions.
    Show { id: String },

    /// Create a quiz from a JSON or YAML document.
    Create {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Let the service extract a quiz from text (a file, or stdin with `-`).
    FromText {
        #[arg(value_name = "FILE", default_value = "-")]
        input: String,

        /// Title to use if none is found in the text.
        #[arg(long = "title")]
        title: Option<String>,
    },

    /// Upload a .txt or .md file for the service to extract a quiz from.
    FromFile {
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Title to use if none is found in the file.
        #[arg(long = "title")]
        title: Option<String>,
    },

    /// Approve a draft quiz and email the form to recipients.
    Approve {
        id: String,

        /// Comma-separated email addresses.
        #[arg(long = "recipients", value_name = "EMAILS")]
        recipients: String,
    },

    /// Delete one or more quizzes, one after another.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Save a quiz as a YAML document that `create` accepts.
    Export {
        id: String,

        #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Show the questions of a generated form.
    FormQuestions { form_id: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    All,
    Draft,
    Approved,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
