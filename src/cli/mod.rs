//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod locate;
pub mod run;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{get_geocoder, PositionBackend};
use crate::map::viewmodel::MapViewModel;
use crate::resolver::{AddressResolver, LocationResolver};
use crate::geo::nominatim::NominatimBackend;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Show the device's location and address on a map
#[derive(Parser)]
#[command(name = "location-info")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive map screen
    Run(run::RunArgs),

    /// Resolve once and print the map frame
    Locate(locate::LocateArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Options shared by the commands that resolve a location
#[derive(Args)]
pub struct LocationArgs {
    /// Treat location permission as granted
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Use this latitude instead of looking up the position
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Use this longitude instead of looking up the position
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Ignore the cached last known position
    #[arg(long)]
    pub no_cache: bool,
}

impl LocationArgs {
    /// The fixed position given on the command line, validated
    pub fn fixed(&self) -> Result<Option<Coordinates>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                let coords = Coordinates::new(lat, lng);
                coords.validate()?;
                Ok(Some(coords))
            }
            (None, None) => Ok(None),
            _ => Err(Error::Input("--lat and --lng must be given together".to_string())),
        }
    }

    /// Build the map screen's view model from config and flags
    pub fn view_model(
        &self,
        config: &Config,
    ) -> Result<MapViewModel<PositionBackend, NominatimBackend>> {
        let source = PositionBackend::from_config(config, self.fixed()?, !self.no_cache)?;
        let geocoder = get_geocoder(config)?;
        Ok(MapViewModel::new(
            LocationResolver::new(source),
            AddressResolver::new(geocoder),
            config.map.zoom,
        ))
    }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` wins over `verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
