//! Runtime configuration read from `BLOCKFALL_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::Level;

use crate::core::{GameOptions, RandomizerKind};
use crate::types::{FALL_INTERVAL_MS, SOFT_DROP_INTERVAL_MS};

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_RANDOMIZER: &str = "BLOCKFALL_RANDOMIZER";
pub const ENV_PREVIEW: &str = "BLOCKFALL_PREVIEW";
pub const ENV_FALL_MS: &str = "BLOCKFALL_FALL_MS";
pub const ENV_SOFT_DROP_MS: &str = "BLOCKFALL_SOFT_DROP_MS";
pub const ENV_LOG_FILE: &str = "BLOCKFALL_LOG_FILE";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}: must be greater than zero")]
    ZeroInterval { var: &'static str },
    #[error("{var}: expected true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },
    #[error("BLOCKFALL_RANDOMIZER: unknown randomizer {0:?} (expected uniform or bag)")]
    UnknownRandomizer(String),
    #[error("BLOCKFALL_LOG: unknown log level {0:?}")]
    UnknownLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u64,
    pub randomizer: RandomizerKind,
    pub preview: bool,
    pub fall_ms: u32,
    pub soft_drop_ms: u32,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let seed = match get(ENV_SEED) {
            Some(v) => parse_number::<u64>(ENV_SEED, v)?,
            None => time_seed(),
        };

        let randomizer = match get(ENV_RANDOMIZER) {
            Some(v) => RandomizerKind::from_str(&v).ok_or(ConfigError::UnknownRandomizer(v))?,
            None => RandomizerKind::default(),
        };

        let preview = match get(ENV_PREVIEW) {
            Some(v) => parse_bool(ENV_PREVIEW, v)?,
            None => true,
        };

        let fall_ms = match get(ENV_FALL_MS) {
            Some(v) => parse_interval(ENV_FALL_MS, v)?,
            None => FALL_INTERVAL_MS,
        };

        let soft_drop_ms = match get(ENV_SOFT_DROP_MS) {
            Some(v) => parse_interval(ENV_SOFT_DROP_MS, v)?,
            None => SOFT_DROP_INTERVAL_MS,
        };

        let log_level = match get(ENV_LOG) {
            Some(v) => Level::from_str(&v).map_err(|_| ConfigError::UnknownLogLevel(v))?,
            None => Level::INFO,
        };

        Ok(Self {
            seed,
            randomizer,
            preview,
            fall_ms,
            soft_drop_ms,
            log_file: get(ENV_LOG_FILE).map(PathBuf::from),
            log_level,
        })
    }

    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            preview: self.preview,
        }
    }
}

fn parse_number<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

fn parse_interval(var: &'static str, value: String) -> Result<u32, ConfigError> {
    match parse_number::<u32>(var, value)? {
        0 => Err(ConfigError::ZeroInterval { var }),
        ms => Ok(ms),
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
