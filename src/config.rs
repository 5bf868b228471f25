//! Layered configuration: compiled defaults, an optional TOML file, CLI
//! flags, credentials from the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::consts;
use crate::error::ConfigError;

/// Overrides read from a TOML file; every key may be absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileConfig {
    pub(crate) source_url: Option<String>,
    pub(crate) filename_suffix: Option<String>,
    pub(crate) filename_contains: Option<String>,
    pub(crate) header_prefix: Option<String>,
    pub(crate) table: Option<String>,
    pub(crate) uid_field: Option<String>,
    pub(crate) time_field: Option<String>,
    pub(crate) max_rows: Option<usize>,
    pub(crate) max_age_days: Option<i64>,
    pub(crate) timeout_secs: Option<u64>,
    pub(crate) retry_delay_secs: Option<u64>,
    pub(crate) api_base: Option<String>,
    pub(crate) strict: Option<bool>,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// First parseable file from the default locations, if any.
    fn discover() -> Self {
        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    debug!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => warn!("{e}"),
            }
        }
        Self::default()
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/icesync/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("icesync").join("config.toml"));
        }

        // 2. Platform config dir (differs from the above on macOS/Windows)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("icesync").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.icesync.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".icesync.toml"));
        }

        paths
    }
}

/// Immutable settings for one run.
#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) source_url: String,
    pub(crate) filename_suffix: String,
    pub(crate) filename_contains: String,
    pub(crate) header_prefix: String,
    pub(crate) table: String,
    pub(crate) uid_field: String,
    pub(crate) time_field: String,
    pub(crate) max_rows: usize,
    pub(crate) max_age_days: i64,
    pub(crate) timeout_secs: u64,
    pub(crate) retry_delay_secs: u64,
    pub(crate) strict: bool,
    pub(crate) clear_table_first: bool,
    pub(crate) api_base: Option<String>,
    pub(crate) carto_user: String,
    pub(crate) carto_key: String,
}

impl Config {
    /// Precedence: compiled defaults, then the config file, then CLI flags.
    /// Credentials come from `CARTO_USER`/`CARTO_KEY` and are required.
    pub(crate) fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::discover(),
        };
        let carto_user = require_env("CARTO_USER")?;
        let carto_key = require_env("CARTO_KEY")?;
        Ok(Self::merge(cli, file, carto_user, carto_key))
    }

    fn merge(cli: &Cli, file: FileConfig, carto_user: String, carto_key: String) -> Self {
        Self {
            source_url: cli
                .source_url
                .clone()
                .or(file.source_url)
                .unwrap_or_else(|| consts::SOURCE_URL.to_string()),
            filename_suffix: file
                .filename_suffix
                .unwrap_or_else(|| consts::FILENAME_SUFFIX.to_string()),
            filename_contains: file
                .filename_contains
                .unwrap_or_else(|| consts::FILENAME_CONTAINS.to_string()),
            header_prefix: file
                .header_prefix
                .unwrap_or_else(|| consts::HEADER_PREFIX.to_string()),
            table: file.table.unwrap_or_else(|| consts::CARTO_TABLE.to_string()),
            uid_field: file
                .uid_field
                .unwrap_or_else(|| consts::UID_FIELD.to_string()),
            time_field: file
                .time_field
                .unwrap_or_else(|| consts::TIME_FIELD.to_string()),
            max_rows: file.max_rows.unwrap_or(consts::MAX_ROWS),
            max_age_days: file.max_age_days.unwrap_or(consts::MAX_AGE_DAYS),
            timeout_secs: cli
                .timeout
                .or(file.timeout_secs)
                .unwrap_or(consts::TIMEOUT_SECS),
            retry_delay_secs: file.retry_delay_secs.unwrap_or(consts::RETRY_DELAY_SECS),
            strict: cli.strict || file.strict.unwrap_or(false),
            clear_table_first: cli.clear_table_first,
            api_base: file.api_base,
            carto_user,
            carto_key,
        }
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnv { name })
}
