//! # Config - runtime settings
//!
//! Settings that are not part of the command line come from the
//! environment, each with a default:
//!
//! ```text
//! STOCKROOM_LOG    tracing filter directive    (default: "warn")
//! STOCKROOM_SYNC   fsync output before rename  (default: "true")
//! ```

use anyhow::{Context, Result};

pub const ENV_LOG: &str = "STOCKROOM_LOG";
pub const ENV_SYNC: &str = "STOCKROOM_SYNC";

pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_SYNC: bool = true;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `EnvFilter` directive for the log subscriber.
    pub log_filter: String,
    /// If `true`, the output file is fsynced before it replaces the old one.
    pub sync_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            sync_output: DEFAULT_SYNC,
        }
    }
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys fall back
    /// to their defaults; present but unparseable values are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup(ENV_LOG)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let sync_output = match lookup(ENV_SYNC) {
            Some(v) => parse_bool(&v).with_context(|| format!("invalid {}", ENV_SYNC))?,
            None => DEFAULT_SYNC,
        };

        Ok(Self {
            log_filter,
            sync_output,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, found {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.log_filter, "warn");
        assert!(cfg.sync_output);
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            (ENV_LOG, "restock=debug"),
            (ENV_SYNC, "false"),
        ]))
        .unwrap();
        assert_eq!(cfg.log_filter, "restock=debug");
        assert!(!cfg.sync_output);
    }

    #[test]
    fn blank_log_filter_uses_default() {
        let cfg = Config::from_lookup(lookup(&[(ENV_LOG, "  ")])).unwrap();
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn bool_spellings() {
        for v in ["1", "TRUE", "yes", "On"] {
            assert!(parse_bool(v).unwrap(), "{}", v);
        }
        for v in ["0", "False", "no", "OFF"] {
            assert!(!parse_bool(v).unwrap(), "{}", v);
        }
    }

    #[test]
    fn bad_sync_value_is_an_error() {
        let err = Config::from_lookup(lookup(&[(ENV_SYNC, "sometimes")])).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains(ENV_SYNC), "{}", msg);
        assert!(msg.contains("sometimes"), "{}", msg);
    }
}
