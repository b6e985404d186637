//! Console configuration module

use crate::checkout::PayloadOptions;
use crate::notify::NotifyConfig;
use clap::Args;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ConsoleConfig {
    /// Backend base URL
    #[arg(long, env = "CONSOLE_API_URL", default_value = "http://localhost:8000/", global = true)]
    pub api_url: String,

    /// Directory holding the session credential and the order draft
    #[arg(long, env = "CONSOLE_STATE_DIR", default_value = ".order-console", global = true)]
    pub state_dir: PathBuf,

    /// How long success notifications stay visible, in milliseconds
    #[arg(long, env = "CONSOLE_NOTIFY_SUCCESS_MS", default_value_t = 3000, global = true)]
    pub notify_success_ms: u64,

    /// How long error notifications stay visible, in milliseconds
    #[arg(long, env = "CONSOLE_NOTIFY_ERROR_MS", default_value_t = 3000, global = true)]
    pub notify_error_ms: u64,

    /// Send `pending_quantity` with every order line
    #[arg(long, env = "CONSOLE_TRACK_PENDING", global = true)]
    pub track_pending: bool,
}

impl ConsoleConfig {
    /// Checks the API URL and returns it normalized with a trailing slash.
    pub fn api_base(&self) -> Result<String, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
        }
        let mut base = url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(base)
    }

    pub fn notify(&self) -> NotifyConfig {
        NotifyConfig {
            success_ttl: Duration::from_millis(self.notify_success_ms),
            error_ttl: Duration::from_millis(self.notify_error_ms),
        }
    }

    pub fn payload_options(&self) -> PayloadOptions {
        PayloadOptions {
            track_pending: self.track_pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: ConsoleConfig,
    }

    #[test]
    fn test_defaults() {
        let config = Harness::try_parse_from(["order-console"]).unwrap().config;
        assert_eq!(config.notify().success_ttl, Duration::from_millis(3000));
        assert!(!config.payload_options().track_pending);
        assert_eq!(config.api_base().unwrap(), "http://localhost:8000/");
    }

    #[test]
    fn test_api_base_is_validated_and_normalized() {
        let config = Harness::try_parse_from([
            "order-console",
            "--api-url",
            "https://api.example.com/v1",
            "--notify-error-ms",
            "5000",
            "--track-pending",
        ])
        .unwrap()
        .config;
        assert_eq!(config.api_base().unwrap(), "https://api.example.com/v1/");
        assert_eq!(config.notify().error_ttl, Duration::from_millis(5000));
        assert!(config.track_pending);

        let bad = ConsoleConfig {
            api_url: "ftp://files".into(),
            ..config
        };
        assert!(matches!(bad.api_base(), Err(ConfigError::InvalidApiUrl { .. })));
    }
}
