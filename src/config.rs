use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Runtime settings for generation and splitting, usually loaded from YAML.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_counter_base")]
    pub counter_base: u64,

    #[serde(default = "default_max_file_count")]
    pub max_file_count: u32,

    #[serde(default)]
    pub throttle: ThrottleConfig,

    #[serde(default)]
    pub split: SplitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            counter_base: default_counter_base(),
            max_file_count: default_max_file_count(),
            throttle: ThrottleConfig::default(),
            split: SplitConfig::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_files")
}

fn default_counter_base() -> u64 {
    2000
}

fn default_max_file_count() -> u32 {
    1000
}

/// Pause inserted between file writes. `every = 0` turns it off.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ThrottleConfig {
    #[serde(default = "default_throttle_every")]
    pub every: u32,
    #[serde(default = "default_throttle_pause_ms")]
    pub pause_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            every: default_throttle_every(),
            pause_ms: default_throttle_pause_ms(),
        }
    }
}

fn default_throttle_every() -> u32 {
    10
}

fn default_throttle_pause_ms() -> u64 {
    1
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SplitConfig {
    #[serde(default = "default_split_dir")]
    pub output_dir: PathBuf,
    /// minijinja pattern; `line` and `timestamp` are in scope.
    #[serde(default = "default_split_file_name")]
    pub file_name: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            output_dir: default_split_dir(),
            file_name: default_split_file_name(),
        }
    }
}

fn default_split_dir() -> PathBuf {
    PathBuf::from("split_files")
}

fn default_split_file_name() -> String {
    "line_{{ line }}_{{ timestamp }}.csv".to_string()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Renders the configuration back to YAML, used by `init`.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("generated_files"));
        assert_eq!(config.counter_base, 2000);
        assert_eq!(config.max_file_count, 1000);
        assert_eq!(config.throttle.every, 10);
        assert_eq!(config.throttle.pause_ms, 1);
        assert_eq!(config.split.output_dir, PathBuf::from("split_files"));
    }

    #[test]
    fn test_load_partial_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("csv-splitter.yaml");
        std::fs::write(
            &path,
            "output_dir: out\nthrottle:\n  every: 0\nsplit:\n  file_name: \"row_{{ line }}.csv\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.throttle.every, 0);
        assert_eq!(config.throttle.pause_ms, 1);
        assert_eq!(config.split.file_name, "row_{{ line }}.csv");
        assert_eq!(config.split.output_dir, PathBuf::from("split_files"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::load(&dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "counter_base: [not, a, number]\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.counter_base, 2000);
        assert_eq!(config.split.file_name, "line_{{ line }}_{{ timestamp }}.csv");
    }
}
