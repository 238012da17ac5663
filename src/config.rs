use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retrieval core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Cache entry time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Over-fetch multiplier applied to `k` before access filtering
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: usize,

    /// Hard cap on candidates requested from the search backend
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Capacity of the process-local LRU cache tier
    #[serde(default = "default_local_cache_capacity")]
    pub local_cache_capacity: usize,

    /// Bounded queue size for analytics events
    #[serde(default = "default_analytics_queue_capacity")]
    pub analytics_queue_capacity: usize,

    /// Analytics worker count; 0 sizes from available CPUs
    #[serde(default)]
    pub analytics_workers: usize,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_overfetch_factor() -> usize {
    3
}

fn default_max_candidates() -> usize {
    50
}

fn default_local_cache_capacity() -> usize {
    256
}

fn default_analytics_queue_capacity() -> usize {
    1024
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            overfetch_factor: default_overfetch_factor(),
            max_candidates: default_max_candidates(),
            local_cache_capacity: default_local_cache_capacity(),
            analytics_queue_capacity: default_analytics_queue_capacity(),
            analytics_workers: 0,
        }
    }
}

impl RetrievalConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = RetrievalConfig::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: RetrievalConfig = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from an explicit path
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context("Failed to read config file")?;

        let config: RetrievalConfig = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".recallbuddy").join("config.toml"))
    }

    /// Resolved analytics worker count
    pub fn analytics_worker_count(&self) -> usize {
        if self.analytics_workers > 0 {
            self.analytics_workers
        } else {
            num_cpus::get().min(4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RetrievalConfig::default();
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.overfetch_factor, 3);
        assert_eq!(config.max_candidates, 50);
        assert!(config.local_cache_capacity > 0);
    }

    #[test]
    fn test_config_parses_partial_toml() {
        let config: RetrievalConfig = toml::from_str("cache_ttl_secs = 60").unwrap();
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.overfetch_factor, 3);
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = RetrievalConfig::default();
        config.cache_ttl_secs = 120;
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = RetrievalConfig::from_file(&path).unwrap();
        assert_eq!(loaded.cache_ttl_secs, 120);
        assert_eq!(loaded.max_candidates, 50);
    }

    #[test]
    fn test_worker_count_resolution() {
        let mut config = RetrievalConfig::default();
        assert!(config.analytics_worker_count() >= 1);

        config.analytics_workers = 2;
        assert_eq!(config.analytics_worker_count(), 2);
    }
}
