//! Store configuration loaded from environment variables.
//!
//! Every setting has a default, so an application can open its database with
//! zero configuration during development.  The ledger table name is not a
//! setting.

use std::path::PathBuf;
use std::time::Duration;

/// SQLite connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database file.
    /// Env: `STEPWISE_DATABASE_PATH`
    /// Default: `./stepwise.db`
    pub database_path: PathBuf,

    /// Value for `PRAGMA journal_mode`.
    /// Env: `STEPWISE_JOURNAL_MODE`
    /// Default: `WAL`
    pub journal_mode: String,

    /// Value for `PRAGMA foreign_keys`.
    /// Env: `STEPWISE_FOREIGN_KEYS` (true/false)
    /// Default: `true`
    pub foreign_keys: bool,

    /// How long a statement waits on a locked database before failing.
    /// Env: `STEPWISE_BUSY_TIMEOUT_MS`
    /// Default: `5000`
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./stepwise.db"),
            journal_mode: "WAL".to_string(),
            foreign_keys: true,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("STEPWISE_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Some(mode) = lookup("STEPWISE_JOURNAL_MODE") {
            if is_journal_mode(&mode) {
                config.journal_mode = mode.to_ascii_uppercase();
            } else {
                tracing::warn!(value = %mode, "Invalid STEPWISE_JOURNAL_MODE, using default");
            }
        }

        if let Some(val) = lookup("STEPWISE_FOREIGN_KEYS") {
            config.foreign_keys = val != "false" && val != "0";
        }

        if let Some(val) = lookup("STEPWISE_BUSY_TIMEOUT_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.busy_timeout = Duration::from_millis(ms),
                Err(e) => {
                    tracing::warn!(
                        value = %val,
                        error = %e,
                        "Invalid STEPWISE_BUSY_TIMEOUT_MS, using default"
                    );
                }
            }
        }

        config
    }
}

fn is_journal_mode(mode: &str) -> bool {
    matches!(
        mode.to_ascii_uppercase().as_str(),
        "DELETE" | "TRUNCATE" | "PERSIST" | "MEMORY" | "WAL" | "OFF"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> StoreConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = load(&[]);
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.journal_mode, "WAL");
        assert!(config.foreign_keys);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STEPWISE_DATABASE_PATH", "/tmp/app.db"),
            ("STEPWISE_JOURNAL_MODE", "delete"),
            ("STEPWISE_FOREIGN_KEYS", "0"),
            ("STEPWISE_BUSY_TIMEOUT_MS", "250"),
        ]);
        assert_eq!(config.database_path, PathBuf::from("/tmp/app.db"));
        assert_eq!(config.journal_mode, "DELETE");
        assert!(!config.foreign_keys);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = load(&[
            ("STEPWISE_JOURNAL_MODE", "sideways"),
            ("STEPWISE_BUSY_TIMEOUT_MS", "soon"),
        ]);
        assert_eq!(config.journal_mode, "WAL");
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
    }
}
