//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration by loading and checking for errors
    ///
    /// Fails on invalid YAML syntax, invalid value types (including unknown
    /// engine kinds or output formats) and file read errors.
    pub fn validate() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            Self::load_file(&root_path)?;
        }

        let _ = Self::load().context("Failed to load merged configuration")?;

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // DEPLOY_BREAKDOWN_ENGINE override
        if let Ok(kind) = std::env::var("DEPLOY_BREAKDOWN_ENGINE") {
            match kind.parse() {
                Ok(kind) => config.engine.default_kind = kind,
                Err(e) => tracing::warn!("Ignoring DEPLOY_BREAKDOWN_ENGINE: {}", e),
            }
        }

        // DEPLOY_BREAKDOWN_FORMAT override
        if let Ok(format) = std::env::var("DEPLOY_BREAKDOWN_FORMAT") {
            match format.parse() {
                Ok(format) => config.output.format = format,
                Err(e) => tracing::warn!("Ignoring DEPLOY_BREAKDOWN_FORMAT: {}", e),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;
    use crate::models::EngineKind;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.engine.default_kind, EngineKind::FivePhase);
    }

    #[test]
    fn test_save_and_load_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Yaml;
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_file_rejects_unknown_engine() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "engine:\n  defaultKind: seven-phase\n").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test in this crate reads these variables.
        unsafe {
            std::env::set_var("DEPLOY_BREAKDOWN_ENGINE", "three-phase");
            std::env::set_var("DEPLOY_BREAKDOWN_FORMAT", "bogus");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.engine.default_kind, EngineKind::ThreePhase);
        assert_eq!(config.output.format, OutputFormat::Json);

        // SAFETY: same as above
        unsafe {
            std::env::remove_var("DEPLOY_BREAKDOWN_ENGINE");
            std::env::remove_var("DEPLOY_BREAKDOWN_FORMAT");
        }
    }
}
