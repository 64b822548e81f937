//! Search command handler
//!
//! One-shot forward search: normalize, query the geocoder, print candidates.

use crate::config::Config;
use crate::error::Result;
use crate::format::get_formatter;
use crate::geo::{get_geocoder, GeoBackend, SearchOptions};
use crate::normalize::Normalizer;
use crate::picker::Notice;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address as a user would type it
    #[arg(num_args = 0..)]
    pub query: Vec<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Maximum number of candidates
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Geocoder base URL (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        super::list_formats();
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(base_url) = args.base_url {
        config.geocoder.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(limit) = args.limit {
        config.geocoder.result_limit = limit;
    }

    let raw = args.query.join(" ");
    if raw.trim().chars().count() < config.picker.min_query_chars {
        eprintln!(
            "Error: Query must be at least {} characters",
            config.picker.min_query_chars
        );
        std::process::exit(1);
    }

    let format = args.format.unwrap_or_else(|| "text".to_string());
    let formatter = match get_formatter(&format) {
        Some(f) => f,
        None => {
            eprintln!("Error: Unknown format '{}'", format);
            super::list_formats();
            std::process::exit(1);
        }
    };

    let normalized = Normalizer::from_region(&config.region).normalize(&raw);
    eprintln!("Searching: {}", normalized);

    let geocoder = get_geocoder(&config)?;
    let candidates = match geocoder
        .search(&normalized, &SearchOptions::from_config(&config))
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            eprintln!("{}", Notice::SearchFailed);
            return Err(e);
        }
    };

    if candidates.is_empty() {
        eprintln!("{}", Notice::NoResults);
        return Ok(());
    }

    println!("{}", formatter.format_candidates(&candidates, &config)?);
    Ok(())
}
