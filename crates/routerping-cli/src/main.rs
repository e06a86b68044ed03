mod cmd;
mod config_path;
mod output;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "routerping",
    about = "Ping a router, record how long it has been up or down, and notify on changes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: nearest config.yml from the current directory)
    #[arg(long, global = true, env = "ROUTERPING_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log progress to stderr (repeat for debug output)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the router once, append the result to its log, and notify if needed
    Check {
        /// IP address or DDNS hostname of the router
        #[arg(long)]
        address: Option<String>,
    },

    /// Show the last recorded state without probing
    Status {
        /// IP address or DDNS hostname of the router
        #[arg(long)]
        address: Option<String>,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config_path::resolve_config(cli.config.as_deref());

    let result = match cli.command {
        Commands::Check { address } => cmd::check::run(&config, address.as_deref(), cli.json),
        Commands::Status { address } => cmd::status::run(&config, address.as_deref(), cli.json),
        Commands::Config { subcommand } => cmd::config::run(&config, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
