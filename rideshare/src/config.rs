//! Runtime configuration.

use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "RIDESHARE_DATA_DIR";

/// Default data directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = "support";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for loading and running the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `passengers.csv`, `drivers.csv` and `trips.csv`.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(DATA_DIR_ENV).filter(|s| !s.is_empty()) {
            Some(dir) => Self::default().with_data_dir(dir),
            None => Self::default(),
        }
    }

    /// Set a custom data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("support"));
    }

    #[test]
    fn with_data_dir() {
        let config = AppConfig::default().with_data_dir("/tmp/rides");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/rides"));
    }

    #[test]
    fn env_overrides_default() {
        let config = AppConfig::from_lookup(|key| {
            (key == DATA_DIR_ENV).then(|| "fixtures/rides".to_string())
        });
        assert_eq!(config.data_dir, PathBuf::from("fixtures/rides"));
    }

    #[test]
    fn empty_env_uses_default() {
        assert_eq!(
            AppConfig::from_lookup(|_| Some(String::new())),
            AppConfig::default()
        );
        assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
    }
}
