//! Configuration loading and management
//!
//! Defaults with environment overrides; nothing is read from or written to
//! disk.

use std::path::PathBuf;
use std::time::Duration;

use crate::hotkey::{Chord, ChordParseError};

const HOTKEY_VAR: &str = "KEYBOARD_TRANSLIT_HOTKEY";
const DEBOUNCE_VAR: &str = "KEYBOARD_TRANSLIT_DEBOUNCE_MS";
const POLL_INTERVAL_VAR: &str = "KEYBOARD_TRANSLIT_POLL_INTERVAL_MS";
const POLL_ATTEMPTS_VAR: &str = "KEYBOARD_TRANSLIT_POLL_ATTEMPTS";
const RESTORE_DELAY_VAR: &str = "KEYBOARD_TRANSLIT_RESTORE_DELAY_MS";

/// Errors from reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOME is not set")]
    MissingHome,

    #[error("{var} must be a whole number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{0} must be at least 1")]
    ZeroAttempts(&'static str),

    #[error("invalid hotkey: {0}")]
    Hotkey(#[from] ChordParseError),
}

/// Delays that pace a run around asynchronous OS copy/paste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Pause between the hotkey press and the copy chord
    pub debounce: Duration,
    /// Gap between clipboard change-counter checks
    pub poll_interval: Duration,
    /// Maximum number of change-counter checks
    pub poll_attempts: u32,
    /// Wait after the paste chord before the clipboard is restored
    pub restore_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            poll_interval: Duration::from_millis(10),
            poll_attempts: 20,
            restore_delay: Duration::from_millis(600),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Global chord that triggers a run
    pub hotkey: Chord,

    /// Run pacing
    pub timings: Timings,

    /// Path to the Unix domain socket for the status-bar control channel
    pub socket_path: PathBuf,

    /// Directory for runtime data
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("HOME").ok_or(ConfigError::MissingHome)?;
        let data_dir = PathBuf::from(&home)
            .join(".local")
            .join("share")
            .join("keyboard-translit");
        let socket_path = data_dir.join("control.sock");

        let hotkey = match lookup(HOTKEY_VAR) {
            Some(text) => Chord::parse(&text)?,
            None => Chord::DEFAULT_HOTKEY,
        };

        let defaults = Timings::default();
        let millis = |var: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            Ok(parse_number(var, &lookup)?.map_or(default, Duration::from_millis))
        };

        let timings = Timings {
            debounce: millis(DEBOUNCE_VAR, defaults.debounce)?,
            poll_interval: millis(POLL_INTERVAL_VAR, defaults.poll_interval)?,
            poll_attempts: match parse_number(POLL_ATTEMPTS_VAR, &lookup)? {
                Some(0) => return Err(ConfigError::ZeroAttempts(POLL_ATTEMPTS_VAR)),
                Some(n) => u32::try_from(n).map_err(|_| ConfigError::InvalidNumber {
                    var: POLL_ATTEMPTS_VAR,
                    value: n.to_string(),
                })?,
                None => defaults.poll_attempts,
            },
            restore_delay: millis(RESTORE_DELAY_VAR, defaults.restore_delay)?,
        };

        Ok(Self {
            hotkey,
            timings,
            socket_path,
            data_dir,
        })
    }

    /// Ensure data directory exists
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}

fn parse_number<F>(var: &'static str, lookup: &F) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { var, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_load() {
        let config = Config::load().unwrap();
        assert!(config.socket_path.to_string_lossy().contains("keyboard-translit"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("HOME", "/Users/test")])).unwrap();
        assert_eq!(config.hotkey, Chord::DEFAULT_HOTKEY);
        assert_eq!(config.timings, Timings::default());
        assert_eq!(config.timings.poll_attempts, 20);
        assert_eq!(config.timings.restore_delay, Duration::from_millis(600));
        assert_eq!(
            config.socket_path,
            PathBuf::from("/Users/test/.local/share/keyboard-translit/control.sock")
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOME", "/Users/test"),
            (HOTKEY_VAR, "cmd+alt+l"),
            (DEBOUNCE_VAR, "50"),
            (POLL_INTERVAL_VAR, " 25 "),
            (POLL_ATTEMPTS_VAR, "8"),
            (RESTORE_DELAY_VAR, "900"),
        ]))
        .unwrap();
        assert_eq!(config.hotkey, Chord::parse("command+option+l").unwrap());
        assert_eq!(
            config.timings,
            Timings {
                debounce: Duration::from_millis(50),
                poll_interval: Duration::from_millis(25),
                poll_attempts: 8,
                restore_delay: Duration::from_millis(900),
            }
        );
    }

    #[test]
    fn test_missing_home() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::MissingHome)
        ));
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("HOME", "/h"), (RESTORE_DELAY_VAR, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var, .. } if var == RESTORE_DELAY_VAR));

        let err = Config::from_lookup(lookup(&[("HOME", "/h"), (POLL_ATTEMPTS_VAR, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroAttempts(_)));

        let err = Config::from_lookup(lookup(&[("HOME", "/h"), (HOTKEY_VAR, "ctrl+")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Hotkey(ChordParseError::MissingKey(_))));
    }
}
