//! location-info: show where you are, on a map
//!
//! A library and CLI tool that asks for location permission, looks up the
//! device's last known position, reverse-geocodes it into an address and
//! shows both on a map surface where further markers can be dropped.
//!
//! ## Features
//!
//! - Permission gate in front of every location and address lookup
//! - IP geolocation with a cached last known fix, or a fixed position
//! - Nominatim reverse geocoding with fallback text for every failure
//! - Map view model with a single camera move and append-only markers
//! - Interactive terminal session + one-shot CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use location_info::geo::fixed::FixedPosition;
//! use location_info::geo::get_geocoder;
//! use location_info::map::viewmodel::MapViewModel;
//! use location_info::resolver::{AddressResolver, LocationResolver};
//! use location_info::{Config, Coordinates};
//!
//! # async fn demo(surface: &mut impl location_info::map::MapSurface) -> location_info::Result<()> {
//! let config = Config::default();
//! let here = FixedPosition::new(Coordinates::new(37.3318, -122.0312));
//!
//! let mut map = MapViewModel::new(
//!     LocationResolver::new(here),
//!     AddressResolver::new(get_geocoder(&config)?),
//!     config.map.zoom,
//! );
//! map.initialize(true, surface).await;
//! println!("{}", map.render_state().status_line());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod console;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod map;
pub mod permission;
pub mod resolver;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use permission::{PermissionGate, PermissionState};
pub use resolver::AddressText;
