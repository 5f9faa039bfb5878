//! CLI command handlers

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::breakdown::{self, SnapshotFormat};
use crate::config::{self, ConfigLoader, OutputFormat, paths};
use crate::models::{DeploymentStatusBreakdown, EngineKind};

/// Arguments for computing a breakdown
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Snapshot file (JSON or YAML); reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Phase ordering: five-phase or three-phase
    #[arg(long, short = 'e')]
    pub engine: Option<EngineKind>,

    /// Output format: json, yaml or text
    #[arg(long, short = 'o')]
    pub format: Option<OutputFormat>,

    /// Treat stdin input as YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "output.format", "engine.defaultKind")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "output.format", "engine.defaultKind")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Compute a breakdown from a snapshot and print it
pub fn handle_compute_command(args: ComputeArgs, config: &config::Config) -> Result<()> {
    let input = match args.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => breakdown::read_snapshot(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        _ => {
            let format = if args.yaml {
                SnapshotFormat::Yaml
            } else {
                SnapshotFormat::Json
            };
            breakdown::read_snapshot_from(std::io::stdin().lock(), format)
                .context("Failed to load snapshot from stdin")?
        }
    };

    let kind = args.engine.unwrap_or(config.engine.default_kind);
    let format = args.format.unwrap_or(config.output.format);
    tracing::debug!("Computing breakdown with engine={} format={}", kind, format);

    let result = breakdown::build_breakdown(&input, kind);
    let rendered = render(&result, format, config.output.pretty)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered).context("Failed to write breakdown")?;
    Ok(())
}

/// Serialize a breakdown in the requested format
pub fn render(
    result: &DeploymentStatusBreakdown,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(result).context("Failed to serialize breakdown")?
        }
        OutputFormat::Json => serde_json::to_string(result).context("Failed to serialize breakdown")?,
        OutputFormat::Yaml => serde_yaml::to_string(result).context("Failed to serialize breakdown")?,
        OutputFormat::Text => breakdown::render_text(result),
    };
    Ok(rendered)
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            // Load config (will use defaults if no file exists)
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = config::get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            // Load existing config or create default
            let mut config = ConfigLoader::load().unwrap_or_else(|_| ConfigLoader::load_defaults());

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save_root(&config).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoarseStatus, DeploymentStatusInput};

    fn succeeded() -> DeploymentStatusBreakdown {
        let input = DeploymentStatusInput {
            coarse_status: Some(CoarseStatus::Succeeded),
            ..Default::default()
        };
        breakdown::build_breakdown(&input, EngineKind::ThreePhase)
    }

    #[test]
    fn test_render_json_compact() {
        let json = render(&succeeded(), OutputFormat::Json, false).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"overallStatus\":\"succeeded\""));
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&succeeded(), OutputFormat::Yaml, true).unwrap();
        assert!(yaml.contains("overallStatus: succeeded"));
        assert!(yaml.contains("APP_HEALTH:"));
    }

    #[derive(clap::Parser)]
    struct ComputeCli {
        #[command(flatten)]
        args: ComputeArgs,
    }

    #[test]
    fn test_compute_args_yaml_stdin() {
        use clap::Parser;

        let cli =
            ComputeCli::try_parse_from(["compute", "-", "--yaml", "-e", "three-phase"]).unwrap();
        assert!(cli.args.yaml);
        assert_eq!(cli.args.file, Some(PathBuf::from("-")));
        assert_eq!(cli.args.engine, Some(EngineKind::ThreePhase));

        let cli = ComputeCli::try_parse_from(["compute"]).unwrap();
        assert!(!cli.args.yaml);
        assert!(cli.args.file.is_none());
    }

    #[test]
    fn test_render_text() {
        let text = render(&succeeded(), OutputFormat::Text, true).unwrap();
        assert!(text.starts_with("Status: Succeeded"));
    }
}
