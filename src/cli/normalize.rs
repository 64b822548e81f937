//! Normalize command handler

use crate::config::Config;
use crate::error::Result;
use crate::normalize::Normalizer;
use clap::Args;

/// Normalize command arguments
#[derive(Args)]
pub struct NormalizeArgs {
    /// Address as a user would type it
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

/// Run the normalize command
pub fn run(args: NormalizeArgs) -> Result<()> {
    let config = Config::load()?;
    let normalizer = Normalizer::from_region(&config.region);

    println!("{}", normalizer.normalize(&args.query.join(" ")));
    Ok(())
}
