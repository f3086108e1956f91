//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "map.zoom")
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
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            print!("{}", render_config(&config));
        }

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n  {}",
                    key,
                    Config::available_keys().join("\n  ")
                )));
            }
        },

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Display all configuration values
fn render_config(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("[permission]\n");
    out.push_str(&format!("auto_grant = {}\n\n", config.permission.auto_grant));

    out.push_str("[location]\n");
    out.push_str(&format!("source = \"{}\"\n", config.location.source));
    match (config.location.lat, config.location.lng) {
        (Some(lat), Some(lng)) => {
            out.push_str(&format!("lat = {}\nlng = {}\n", lat, lng));
        }
        _ => out.push_str("# lat/lng not set\n"),
    }
    out.push_str(&format!("cache_ttl_secs = {}\n\n", config.location.cache_ttl_secs));

    out.push_str("[geocoder]\n");
    out.push_str(&format!("url = \"{}\"\n", config.geocoder.url));
    out.push_str(&format!("language = \"{}\"\n", config.geocoder.language));
    out.push_str(&format!("user_agent = \"{}\"\n\n", config.geocoder.user_agent));

    out.push_str("[map]\n");
    out.push_str(&format!("zoom = {}\n", config.map.zoom));
    out.push_str(&format!("provider = \"{}\"\n\n", config.map.provider));

    out.push_str("[map.providers]\n");
    let mut providers: Vec<_> = config.map.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        out.push_str(&format!("{} = \"{}\"\n", name, template));
    }

    out
}
