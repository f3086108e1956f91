//! Positioning and geocoding services
//!
//! Provides the last known position (IP geolocation or a fixed coordinate)
//! and reverse geocoding (coordinates to address) behind two small traits.

pub mod fixed;
pub mod ip_location;
pub mod nominatim;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// One reverse geocoding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCandidate {
    /// Where the geocoder placed the address
    pub position: Coordinates,
    /// Formatted address lines, most complete first
    pub lines: Vec<String>,
}

impl AddressCandidate {
    /// A candidate with a single formatted line
    pub fn new(position: Coordinates, line: impl Into<String>) -> Self {
        Self {
            position,
            lines: vec![line.into()],
        }
    }

    /// Formatted line `index`, if present
    pub fn address_line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

/// Trait for position sources
pub trait PositionSource: Send + Sync {
    /// The cached position, without waiting for a fresh fix
    ///
    /// `Ok(None)` means no fix is available. A source that refuses the
    /// caller returns `Error::Unauthorized`.
    fn last_known_position(&self) -> impl Future<Output = Result<Option<Coordinates>>> + Send;
}

/// Trait for reverse geocoding backends
pub trait ReverseGeocoder: Send + Sync {
    /// Reverse geocode coordinates into at most `max_results` candidates
    ///
    /// An empty list means the geocoder knows no address there.
    fn reverse_geocode(
        &self,
        coords: Coordinates,
        max_results: usize,
    ) -> impl Future<Output = Result<Vec<AddressCandidate>>> + Send;
}

/// The position sources selectable from config or flags
#[derive(Debug)]
pub enum PositionBackend {
    Ip(ip_location::IpLocator),
    Fixed(fixed::FixedPosition),
}

impl PositionBackend {
    /// Build the configured source
    ///
    /// `fixed` (from `--lat/--lng`) wins over the config; `use_cache = false`
    /// forces a fresh IP lookup.
    pub fn from_config(config: &Config, fixed: Option<Coordinates>, use_cache: bool) -> Result<Self> {
        let fixed = match fixed {
            Some(coords) => Some(coords),
            None => config.fixed_position()?,
        };
        if let Some(coords) = fixed {
            return Ok(Self::Fixed(fixed::FixedPosition::new(coords)));
        }

        let locator = if use_cache {
            ip_location::IpLocator::new()
        } else {
            ip_location::IpLocator::without_cache()
        };
        Ok(Self::Ip(
            locator.with_ttl(Duration::from_secs(config.location.cache_ttl_secs)),
        ))
    }
}

impl PositionSource for PositionBackend {
    async fn last_known_position(&self) -> Result<Option<Coordinates>> {
        match self {
            Self::Ip(locator) => locator.last_known_position().await,
            Self::Fixed(fixed) => fixed.last_known_position().await,
        }
    }
}

/// Get the geocoding backend described by the config
pub fn get_geocoder(config: &Config) -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::from_config(&config.geocoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_candidate_lines() {
        let candidate = AddressCandidate::new(Coordinates::new(1.0, 2.0), "1 Main St");
        assert_eq!(candidate.address_line(0), Some("1 Main St"));
        assert_eq!(candidate.address_line(1), None);
    }

    #[test]
    fn test_backend_from_flags_wins() {
        let config = Config::default();
        let backend =
            PositionBackend::from_config(&config, Some(Coordinates::new(1.0, 2.0)), true).unwrap();
        assert!(matches!(backend, PositionBackend::Fixed(_)));
    }

    #[test]
    fn test_backend_from_config() {
        let mut config = Config::default();
        let backend = PositionBackend::from_config(&config, None, false).unwrap();
        assert!(matches!(backend, PositionBackend::Ip(_)));

        config.set("location.source", "fixed").unwrap();
        assert!(PositionBackend::from_config(&config, None, true).is_err());

        config.set("location.lat", "10").unwrap();
        config.set("location.lng", "20").unwrap();
        let backend = PositionBackend::from_config(&config, None, true).unwrap();
        assert!(matches!(backend, PositionBackend::Fixed(_)));
    }

    #[tokio::test]
    async fn test_fixed_backend_dispatch() {
        let backend = PositionBackend::Fixed(fixed::FixedPosition::new(Coordinates::new(3.0, 4.0)));
        assert_eq!(
            backend.last_known_position().await.unwrap(),
            Some(Coordinates::new(3.0, 4.0))
        );
    }
}
