//! `docbot.ron` configuration.
//!
//! Every field is optional in the file; absent fields take their defaults and
//! CLI flags win over both.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use docbot_engine::{DEFAULT_CONTRACT_API, DEFAULT_SCRAPER_API};
use docbot_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper_api: String,
    pub contract_api: String,
    /// Pause between full-workflow stages; 0 disables it.
    pub stage_pause_ms: u64,
    /// Where downloaded contracts are written.
    pub output_dir: PathBuf,
    /// `terminal`, `file` or `both`.
    pub log: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scraper_api: DEFAULT_SCRAPER_API.to_string(),
            contract_api: DEFAULT_CONTRACT_API.to_string(),
            stage_pause_ms: 1000,
            output_dir: PathBuf::from("contracts"),
            log: "file".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Reads the config file; `Ok(None)` when it does not exist.
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

impl AppConfig {
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.scraper_url {
            self.scraper_api = url.clone();
        }
        if let Some(url) = &cli.contract_url {
            self.contract_api = url.clone();
        }
        if let Some(target) = cli.log {
            self.log = target.as_str().to_string();
        }
    }

    /// Unknown values fall back to file logging.
    pub fn log_destination(&self) -> LogDestination {
        LogDestination::parse(&self.log).unwrap_or_default()
    }

    pub fn stage_pause(&self) -> Duration {
        Duration::from_millis(self.stage_pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{read_config, AppConfig, ConfigError};
    use crate::platform::cli::Cli;
    use clap::Parser;
    use docbot_logging::LogDestination;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read_config(&temp.path().join("docbot.ron")).unwrap(), None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docbot.ron");
        fs::write(&path, "(stage_pause_ms: 0, output_dir: \"out\")").unwrap();

        let config = read_config(&path).unwrap().unwrap();
        assert_eq!(
            config,
            AppConfig {
                stage_pause_ms: 0,
                output_dir: PathBuf::from("out"),
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docbot.ron");
        fs::write(&path, "(stage_pause_ms: \"soon\"").unwrap();

        assert!(matches!(read_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let cli = Cli::try_parse_from([
            "docbot",
            "--contract-url",
            "http://contracts.local/api",
            "--log",
            "terminal",
            "contract",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        config.apply_overrides(&cli);

        assert_eq!(config.contract_api, "http://contracts.local/api");
        assert_eq!(config.scraper_api, AppConfig::default().scraper_api);
        assert_eq!(config.log_destination(), LogDestination::Terminal);
    }

    #[test]
    fn unknown_log_value_falls_back_to_file() {
        let config = AppConfig {
            log: "syslog".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_destination(), LogDestination::File);
    }
}
