//! IP-based geolocation
//!
//! Uses ip-api.com for IP geolocation. The last fix is kept in a cache file
//! and served as the last known position until it expires.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::PositionSource;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing::debug;

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
    cache_path: Option<PathBuf>,
    ttl: Duration,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Cached last known position
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPosition {
    position: Coordinates,
    timestamp: u64,
}

impl IpLocator {
    /// Create a new IP locator with default cache path
    pub fn new() -> Self {
        let cache_path = dirs::cache_dir()
            .map(|p| p.join("location-info").join(IP_LOCATION_CACHE_FILE));

        Self {
            client: reqwest::Client::new(),
            url: IP_API_URL.to_string(),
            cache_path,
            ttl: Self::default_ttl(),
        }
    }

    /// Create an IP locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Self {
        Self {
            cache_path: Some(cache_path),
            ..Self::without_cache()
        }
    }

    /// Create an IP locator without caching
    pub fn without_cache() -> Self {
        Self {
            client: reqwest::Client::new(),
            url: IP_API_URL.to_string(),
            cache_path: None,
            ttl: Self::default_ttl(),
        }
    }

    /// Use a different ip-api compatible endpoint
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// How long a cached fix stays valid
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Default cache duration
    pub fn default_ttl() -> Duration {
        Duration::from_secs(IP_LOCATION_TTL_SECS)
    }

    /// Fetch location from ip-api.com
    async fn fetch_position(&self) -> Result<Option<Coordinates>> {
        let response = self.client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("IP location request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized(format!(
                "IP location API refused the request: {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(Error::Geo(format!(
                "IP location API returned status: {}",
                status
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        Ok(Self::position_from(data))
    }

    /// A failed lookup ("private range", "reserved range", ...) is no fix
    fn position_from(data: IpApiResponse) -> Option<Coordinates> {
        if data.status != "success" {
            debug!(
                "IP location lookup failed: {}",
                data.message.as_deref().unwrap_or("no message")
            );
            return None;
        }

        let coords = Coordinates::new(data.lat?, data.lon?);
        coords.validate().ok()?;
        Some(coords)
    }

    /// Load cached position if valid
    fn load_cache(&self) -> Option<Coordinates> {
        let cache_path = self.cache_path.as_ref()?;

        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedPosition = serde_json::from_str(&content).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        if now.saturating_sub(cached.timestamp) < self.ttl.as_secs() {
            Some(cached.position)
        } else {
            None
        }
    }

    /// Save position to cache
    fn save_cache(&self, position: Coordinates) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let cached = CachedPosition { position, timestamp };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSource for IpLocator {
    async fn last_known_position(&self) -> Result<Option<Coordinates>> {
        if let Some(cached) = self.load_cache() {
            debug!("Using cached position {}", cached);
            return Ok(Some(cached));
        }

        let position = self.fetch_position().await?;
        if let Some(position) = position {
            self.save_cache(position);
        }
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use tempfile::TempDir;

    #[test]
    fn test_ip_locator_creation() {
        let locator = IpLocator::new();
        assert!(locator.cache_path.is_some());
        assert_eq!(locator.ttl, IpLocator::default_ttl());
    }

    #[test]
    fn test_ip_locator_without_cache() {
        let locator = IpLocator::without_cache();
        assert!(locator.cache_path.is_none());
    }

    #[test]
    fn test_cache_operations() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");
        let locator = IpLocator::with_cache_path(cache_path);

        assert!(locator.load_cache().is_none());

        locator.save_cache(Coordinates::new(40.7128, -74.0060));
        let loaded = locator.load_cache().unwrap();
        assert_eq!(loaded.lat, 40.7128);

        locator.clear_cache();
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_expired_cache_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let locator = IpLocator::with_cache_path(temp_dir.path().join("cache.json"))
            .with_ttl(Duration::ZERO);

        locator.save_cache(Coordinates::new(1.0, 2.0));
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_failed_lookup_is_no_fix() {
        let data = IpApiResponse {
            status: "fail".to_string(),
            lat: None,
            lon: None,
            message: Some("private range".to_string()),
        };
        assert!(IpLocator::position_from(data).is_none());
    }

    #[tokio::test]
    async fn test_lookup_caches_fix() {
        let app = Router::new().route(
            "/json",
            get(|| async {
                Json(serde_json::json!({
                    "status": "success",
                    "lat": 37.0,
                    "lon": -122.0,
                    "city": "Cupertino"
                }))
            }),
        );
        let base = serve(app).await;

        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("cache.json");
        let locator = IpLocator::with_cache_path(cache_path.clone())
            .with_url(format!("{}/json", base));

        let position = locator.last_known_position().await.unwrap();
        assert_eq!(position, Some(Coordinates::new(37.0, -122.0)));
        assert!(cache_path.exists());

        // Served from the cache even once the endpoint is gone
        let offline = IpLocator::with_cache_path(cache_path).with_url("http://127.0.0.1:9/json");
        assert_eq!(
            offline.last_known_position().await.unwrap(),
            Some(Coordinates::new(37.0, -122.0))
        );
    }

    #[tokio::test]
    async fn test_forbidden_is_unauthorized() {
        let app = Router::new().route("/json", get(|| async { AxumStatus::FORBIDDEN }));
        let base = serve(app).await;

        let locator = IpLocator::without_cache().with_url(format!("{}/json", base));
        let result = locator.last_known_position().await;
        assert!(matches!(result, Err(Error::Unauthorized(_))));
    }
}
