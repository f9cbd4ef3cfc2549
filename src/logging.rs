//! Log setup for the terminal binary.
//!
//! The game owns the terminal, so log lines never go to stdout or stderr.
//! Logging is only enabled when a log file is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};

use crate::config::Config;

/// Install the global subscriber. Returns `false` when no log file is configured.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_log_file_means_no_subscriber() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let config = Config::from_lookup(|key| {
            (key == crate::config::ENV_LOG_FILE)
                .then(|| "/nonexistent-dir/blockfall/game.log".to_string())
        })
        .unwrap();
        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("opening log file"));
    }
}
