//! Nominatim reverse geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for reverse geocoding.
//! Usage policy: at most 1 request per second and an identifying User-Agent.

use crate::config::GeocoderConfig;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{AddressCandidate, ReverseGeocoder};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    language: Option<String>,
}

/// Nominatim reverse response
///
/// A position with no address comes back as `{"error": "Unable to geocode"}`
/// with a 200 status.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found(NominatimResult),
    Error { error: String },
}

/// Nominatim result item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimBackend {
    /// Create a backend from geocoder settings
    pub fn from_config(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Geocoding(format!("Failed to build HTTP client: {}", e)))?;

        let language = Some(config.language.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            language,
        })
    }

    /// Build the reverse lookup URL
    fn reverse_url(&self, coords: Coordinates) -> String {
        let mut url = format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2",
            self.base_url, coords.lat, coords.lng
        );
        if let Some(language) = &self.language {
            url.push_str("&accept-language=");
            url.push_str(&urlencoding::encode(language));
        }
        url
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat.parse().map_err(|_| {
            Error::Geocoding(format!("Invalid latitude: {}", lat))
        })?;
        let lng: f64 = lng.parse().map_err(|_| {
            Error::Geocoding(format!("Invalid longitude: {}", lng))
        })?;
        Ok(Coordinates::new(lat, lng))
    }

    fn candidates_from(response: ReverseResponse) -> Result<Vec<AddressCandidate>> {
        match response {
            ReverseResponse::Found(result) => {
                let position = Self::parse_coords(&result.lat, &result.lon)?;
                Ok(vec![AddressCandidate::new(position, result.display_name)])
            }
            ReverseResponse::Error { error } => {
                debug!("Nominatim has no address: {}", error);
                Ok(Vec::new())
            }
        }
    }
}

impl ReverseGeocoder for NominatimBackend {
    async fn reverse_geocode(
        &self,
        coords: Coordinates,
        max_results: usize,
    ) -> Result<Vec<AddressCandidate>> {
        coords.validate()?;
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let response = self.client
            .get(self.reverse_url(coords))
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(Vec::new());
            }
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        let mut candidates = Self::candidates_from(body)?;
        candidates.truncate(max_results);
        Ok(candidates)
    }
}
