//! Configuration management for the symbol pipeline
//!
//! Loads configuration from config.toml at startup.
//! All values are configurable to avoid hardcoded constants.

use crate::artifacts::ArtifactPaths;
use crate::source::DEFAULT_EXCHANGE_INFO_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pipeline configuration
///
/// Loaded from config.toml (or `CONFIG_PATH`). Every section falls back to
/// its defaults when omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Exchange metadata source
    #[serde(default)]
    pub source: SourceConfig,

    /// Artifact locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Benchmark harness settings
    #[serde(default)]
    pub bench: BenchConfig,

    /// Status endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Log file settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Exchange metadata source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_exchange_info_url")]
    pub exchange_info_url: String,

    /// Cached exchange info document; authoritative when present
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

/// Artifact output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_json_map_path")]
    pub json_map_path: PathBuf,

    #[serde(default = "default_perfect_hash_source_path")]
    pub perfect_hash_source_path: PathBuf,
}

/// Benchmark configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchConfig {
    /// Lookups per measured path
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Workload RNG seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Threads for the parallel lookup run (1 = skip)
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Allowed slowdown of the perfect-hash path vs the dynamic map (0.10 = 10%)
    #[serde(default = "default_regression_tolerance")]
    pub regression_tolerance: f64,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Port for HTTP API server
    #[serde(default = "default_api_port")]
    pub port: u16,
}

/// Log file configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            exchange_info_url: default_exchange_info_url(),
            cache_path: default_cache_path(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_map_path: default_json_map_path(),
            perfect_hash_source_path: default_perfect_hash_source_path(),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: default_seed(),
            threads: default_threads(),
            regression_tolerance: default_regression_tolerance(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

fn default_exchange_info_url() -> String {
    DEFAULT_EXCHANGE_INFO_URL.to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("binance.json")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> usize {
    3
}

fn default_json_map_path() -> PathBuf {
    PathBuf::from("symbols.json")
}

fn default_perfect_hash_source_path() -> PathBuf {
    PathBuf::from("symbol_keywords.gperf")
}

fn default_trials() -> usize {
    1_000_000
}

fn default_seed() -> u64 {
    42
}

fn default_threads() -> usize {
    1
}

fn default_regression_tolerance() -> f64 {
    0.10
}

fn default_api_port() -> u16 {
    8000
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Config {
    /// Load configuration from config.toml file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// # Errors
    /// Returns error if file exists but cannot be parsed or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File not found - use defaults
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::IoError(e)),
        }
    }

    /// Parse and validate TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.source.exchange_info_url)
            .map_err(|e| ConfigError::Invalid(format!("source.exchange_info_url: {}", e)))?;
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid("source.timeout_secs must be positive".into()));
        }
        if self.bench.trials == 0 {
            return Err(ConfigError::Invalid("bench.trials must be positive".into()));
        }
        if self.bench.threads == 0 {
            return Err(ConfigError::Invalid("bench.threads must be positive".into()));
        }
        if !(self.bench.regression_tolerance >= 0.0) {
            return Err(ConfigError::Invalid("bench.regression_tolerance must be >= 0".into()));
        }
        Ok(())
    }

    /// Artifact paths from the output section
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            json_map: self.output.json_map_path.clone(),
            perfect_hash_source: self.output.perfect_hash_source_path.clone(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading file
    IoError(std::io::Error),
    /// Parse error (invalid TOML)
    ParseError(String),
    /// Value out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::ParseError(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(_) | ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.exchange_info_url, DEFAULT_EXCHANGE_INFO_URL);
        assert_eq!(config.source.cache_path, PathBuf::from("binance.json"));
        assert_eq!(config.bench.trials, 1_000_000);
        assert_eq!(config.bench.seed, 42);
        assert_eq!(config.api.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [bench]
            trials = 5000

            [output]
            json_map_path = "out/symbols.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.bench.trials, 5000);
        assert_eq!(config.bench.seed, 42);
        assert_eq!(config.artifact_paths().json_map, PathBuf::from("out/symbols.json"));
        assert_eq!(
            config.artifact_paths().perfect_hash_source,
            PathBuf::from("symbol_keywords.gperf")
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::from_toml("[source]\nexchange_info_url = \"not a url\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[bench]\ntrials = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[bench]\ntrials = \"many\""),
            Err(ConfigError::ParseError(_))
        ));
    }
}
