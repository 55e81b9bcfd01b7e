use clap::{Parser, Subcommand};
use colored::*;
use git_statusline::commands::*;
use git_statusline::core::{error::StatuslineError, ConfigOverrides, EngineConfig};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-statusline")]
#[command(about = "Live git status summaries for status-line renderers")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the polling engine and reprint the summary line on every change
    Run {
        /// Auto-fetch interval in milliseconds (0 disables)
        #[arg(long)]
        interval: Option<u64>,
        /// Disable the periodic background fetch
        #[arg(long)]
        no_fetch: bool,
        /// Status command timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Repository directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Poll once, print the summary and exit
    Once {
        /// Print the raw snapshot as JSON instead of the summary line
        #[arg(long)]
        json: bool,
        /// Status command timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Repository directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Print an error message in the shared CLI format.
fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let file_config = EngineConfig::load_or_default();

    // Configure logging based on --debug flag and the config file
    if cli.debug || file_config.debug_logging {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match cli.command {
        Commands::Run {
            interval,
            no_fetch,
            timeout,
            dir,
        } => {
            let config = file_config.merged_with(ConfigOverrides {
                auto_fetch_interval_ms: interval,
                disable_auto_fetch: no_fetch,
                status_timeout_ms: timeout,
                debug_logging: cli.debug.then_some(true),
                workdir: dir,
            });
            if let Err(e) = execute_run(config).await {
                print_error(&e.to_string());
                std::process::exit(1);
            }
        }
        Commands::Once { json, timeout, dir } => {
            let config = file_config.merged_with(ConfigOverrides {
                status_timeout_ms: timeout,
                debug_logging: cli.debug.then_some(true),
                workdir: dir,
                ..Default::default()
            });
            if let Err(e) = execute_once(config, json).await {
                if let StatuslineError::NotInGitRepo = e {
                    print_error("Not in a git repository");
                } else {
                    print_error(&e.to_string());
                }
                std::process::exit(1);
            }
        }
    }
}
