//! Configuration system for deploy-breakdown
//!
//! A single YAML file plus environment overrides, with dot-notation access
//! for the `config` subcommands.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, EngineConfig, LoggerConfig, OutputConfig, OutputFormat};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "engine.defaultKind" => Ok(config.engine.default_kind.to_string()),
        "output.format" => Ok(config.output.format.to_string()),
        "output.pretty" => Ok(config.output.pretty.to_string()),
        "logger.filter" => Ok(config.logger.filter.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "engine.defaultKind" => {
            config.engine.default_kind = value.parse().map_err(|e: String| {
                anyhow::anyhow!("{} (expected 'five-phase' or 'three-phase')", e)
            })?;
        }
        "output.format" => {
            config.output.format = value.parse().map_err(|e: String| {
                anyhow::anyhow!("{} (expected 'json', 'yaml' or 'text')", e)
            })?;
        }
        "output.pretty" => {
            use anyhow::Context;
            config.output.pretty = value
                .parse()
                .context("output.pretty must be 'true' or 'false'")?;
        }
        "logger.filter" => {
            config.logger.filter = value.to_string();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EngineKind;

    #[test]
    fn test_get_set_round_trip() {
        let mut config = Config::default();
        set_config_value(&mut config, "engine.defaultKind", "three-phase").unwrap();
        set_config_value(&mut config, "output.format", "yaml").unwrap();
        set_config_value(&mut config, "output.pretty", "false").unwrap();

        assert_eq!(config.engine.default_kind, EngineKind::ThreePhase);
        assert_eq!(get_config_value(&config, "output.format").unwrap(), "yaml");
        assert_eq!(get_config_value(&config, "output.pretty").unwrap(), "false");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "output.format", "xml").is_err());
        assert!(set_config_value(&mut config, "output.pretty", "maybe").is_err());
        assert!(set_config_value(&mut config, "ui.skin", "dracula").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_key() {
        assert!(get_config_value(&Config::default(), "readOnly").is_err());
    }
}
