//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod normalize;
pub mod pick;
pub mod reverse;
pub mod search;
pub mod serve;

use crate::format::available_formats;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Address lookup for event bookings
#[derive(Parser)]
#[command(name = "event-locator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a free-text address will be sent to the geocoder
    Normalize(normalize::NormalizeArgs),

    /// Search for an address
    Search(search::SearchArgs),

    /// Look up the address at a coordinate
    Reverse(reverse::ReverseArgs),

    /// Interactive location picker on stdin
    Pick(pick::PickArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_level);

    match cli.command {
        Commands::Normalize(args) => normalize::run(args),
        Commands::Search(args) => search::run(args).await,
        Commands::Reverse(args) => reverse::run(args).await,
        Commands::Pick(args) => pick::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Log to stderr, honoring `RUST_LOG` when set
fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print the output formats shared by `search` and `reverse`
pub(crate) fn list_formats() {
    println!("Available output formats:");
    for info in available_formats() {
        println!("  {:8} {}", info.name, info.description);
    }
}
