use std::env;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_URL_VAR: &str = "AUTOQUIZ_API_URL";
const TIMEOUT_VAR: &str = "AUTOQUIZ_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// base URL of the quiz API, without trailing slash
    pub api_url: String,

    /// per-request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl Config {
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Loads `.env` if present, then reads `AUTOQUIZ_API_URL` and
    /// `AUTOQUIZ_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(env::var(API_URL_VAR).ok(), env::var(TIMEOUT_VAR).ok())
    }

    fn from_vars(api_url: Option<String>, timeout: Option<String>) -> anyhow::Result<Self> {
        let api_url = api_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match timeout {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context(format!("{} must be a number of seconds, got '{}'", TIMEOUT_VAR, raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("{} must be at least 1 second", TIMEOUT_VAR);
        }

        Ok(Self::new(api_url.trim(), Duration::from_secs(timeout_secs)))
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs.filter(|s| *s > 0) {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}
