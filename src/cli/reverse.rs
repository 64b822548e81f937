//! Reverse command handler
//!
//! Resolves a coordinate into the location the booking form would receive.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::get_formatter;
use crate::geo::get_geocoder;
use crate::geo::reverse::resolve_address;
use crate::picker::ResolvedLocation;
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Geocoder base URL (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(base_url) = args.base_url {
        config.geocoder.base_url = base_url.trim_end_matches('/').to_string();
    }

    let position = Coordinates::new(args.lat, args.lng);
    position.validate()?;

    let format = args.format.unwrap_or_else(|| "json".to_string());
    let formatter = match get_formatter(&format) {
        Some(f) => f,
        None => {
            eprintln!("Error: Unknown format '{}'", format);
            super::list_formats();
            std::process::exit(1);
        }
    };

    let geocoder = get_geocoder(&config)?;
    let address = resolve_address(&geocoder, position).await;
    let location = ResolvedLocation::new(position, address);

    println!("{}", formatter.format_location(&location, &config)?);
    Ok(())
}
