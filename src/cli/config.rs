//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "region.default_city")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (args.key.as_deref(), args.value.as_deref()) {
        (None, None) => show_all_config(&config),

        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("Available keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        },

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[geocoder]");
    println!("base_url = \"{}\"", config.geocoder.base_url);
    println!("user_agent = \"{}\"", config.geocoder.user_agent);
    println!("timeout_secs = {}", config.geocoder.timeout_secs);
    println!("result_limit = {}", config.geocoder.result_limit);
    println!();

    println!("[region]");
    println!("country_code = \"{}\"", config.region.country_code);
    println!("locale = \"{}\"", config.region.locale);
    println!("default_city = \"{}\"", config.region.default_city);
    println!("default_country = \"{}\"", config.region.default_country);
    println!("cities = {:?}", config.region.cities);
    println!("center_lat = {}", config.region.center_lat);
    println!("center_lng = {}", config.region.center_lng);
    println!();

    println!("[picker]");
    println!("debounce_ms = {}", config.picker.debounce_ms);
    println!("min_query_chars = {}", config.picker.min_query_chars);
    println!("default_zoom = {}", config.picker.default_zoom);
    println!("focus_zoom = {}", config.picker.focus_zoom);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
}
