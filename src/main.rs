//! event-locator CLI entry point
//!
//! Address search and reverse geocoding for event bookings - CLI + web API

use event_locator::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
