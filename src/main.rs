//! location-info CLI entry point
//!
//! Location, address and map markers on the terminal

use location_info::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
