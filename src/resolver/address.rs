//! Reverse geocoding into display text

use crate::constants::geocoder::MAX_RESULTS;
use crate::constants::text::{
    ADDRESS_NOT_FOUND, ERROR_FETCHING_ADDRESS, FETCHING_ADDRESS, UNKNOWN_LOCATION,
};
use crate::coord::Coordinates;
use crate::geo::ReverseGeocoder;
use serde::{Serialize, Serializer};
use tracing::debug;

/// The address shown for the user's location
///
/// Always has display text: `Pending` covers the time before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddressText {
    #[default]
    Pending,
    /// First formatted line of the first geocoder result
    Resolved(String),
    /// There was no coordinate to look up
    UnknownLocation,
    /// The geocoder returned no results
    NotFound,
    /// The geocoder failed
    FetchError,
}

impl AddressText {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => FETCHING_ADDRESS,
            Self::Resolved(line) => line,
            Self::UnknownLocation => UNKNOWN_LOCATION,
            Self::NotFound => ADDRESS_NOT_FOUND,
            Self::FetchError => ERROR_FETCHING_ADDRESS,
        }
    }

    /// Whether resolution has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for AddressText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AddressText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Turns an optional coordinate into address text
#[derive(Debug)]
pub struct AddressResolver<G> {
    geocoder: G,
}

impl<G: ReverseGeocoder> AddressResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Resolve the address for `coordinate`
    ///
    /// No coordinate means no lookup. Otherwise exactly one request for a
    /// single result is made; an empty answer, a blank line and a fault each
    /// have their own fallback text.
    pub async fn resolve_address(&self, coordinate: Option<Coordinates>) -> AddressText {
        let Some(coords) = coordinate else {
            return AddressText::UnknownLocation;
        };

        match self.geocoder.reverse_geocode(coords, MAX_RESULTS).await {
            Ok(candidates) => {
                let line = candidates
                    .first()
                    .and_then(|c| c.address_line(0))
                    .map(str::trim)
                    .filter(|l| !l.is_empty());
                match line {
                    Some(line) => AddressText::Resolved(line.to_string()),
                    None => AddressText::NotFound,
                }
            }
            Err(e) => {
                debug!("Reverse geocoding {} failed: {}", coords, e);
                AddressText::FetchError
            }
        }
    }
}
