//! deploy-breakdown - compute a per-phase deployment progress breakdown
//!
//! Reads a deployment status snapshot (as produced by the polling client),
//! runs the breakdown engine and prints the result.

use anyhow::Result;
use clap::{Parser, Subcommand};

use deploy_breakdown::cli::{self, ComputeArgs, ConfigSubcommand};
use deploy_breakdown::config::ConfigLoader;

/// deploy-breakdown - compute a per-phase deployment progress breakdown
#[derive(Parser, Debug)]
#[command(name = "deploy-breakdown")]
#[command(about = "Reconstructs a per-phase progress breakdown of a deployment", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the breakdown for a status snapshot
    Compute(ComputeArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Config { subcommand } => cli::handle_config_command(subcommand),
        Command::Version => {
            cli::display_version();
            Ok(())
        }
        Command::Compute(compute) => {
            let config = ConfigLoader::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration, using defaults: {:#}", e);
                ConfigLoader::load_defaults()
            });

            // Log file location goes to stderr so stdout stays parseable
            if let Some(log_path) = cli::init_logging(args.debug, &config.logger.filter) {
                eprintln!(
                    "Debug logging enabled. Logs written to: {}",
                    log_path.display()
                );
                tracing::debug!("Debug logging enabled");
            }

            cli::handle_compute_command(compute, &config)
        }
    }
}
