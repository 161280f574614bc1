// src/config.rs
// Application settings read from a `key = value` file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BingoError;
use crate::logging::{log_info, log_warning, LogLevel};

pub const DEFAULT_CONFIG_PATH: &str = "conf/bingo.conf";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the persisted game state, card and preferences.
    pub data_dir: PathBuf,
    /// How many previously called numbers the caller shows.
    pub previous_numbers: usize,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            previous_numbers: 3,
            log_level: LogLevel::Info,
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BingoError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_str_content(&content))
    }

    /// Unknown keys are ignored and malformed values fall back to defaults.
    pub fn from_str_content(content: &str) -> Self {
        let config_map = parse_config(content);
        let defaults = Self::default();

        let data_dir = config_map
            .get("data_dir")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let previous_numbers = config_map
            .get("previous_numbers")
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(defaults.previous_numbers);

        let log_level = config_map
            .get("log_level")
            .and_then(|l| l.parse::<LogLevel>().ok())
            .unwrap_or(defaults.log_level);

        AppConfig { data_dir, previous_numbers, log_level }
    }

    pub fn load_or_default() -> Self {
        Self::load_from_or_default(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(config) => {
                log_info(&format!("Loaded configuration from {}", path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!("Could not load config from {}: {}. Using defaults.", path.display(), e));
                Self::default()
            }
        }
    }
}

fn parse_config(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
