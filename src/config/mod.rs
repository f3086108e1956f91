//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/location-info/config.toml

pub mod defaults;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Location permission settings
    #[serde(default)]
    pub permission: PermissionConfig,

    /// Position source settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Reverse geocoder settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Map camera and URL settings
    #[serde(default)]
    pub map: MapConfig,
}

/// Location permission settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// Treat the location capability as granted without asking
    #[serde(default)]
    pub auto_grant: bool,
}

/// Position source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Where the last known position comes from: "ip" or "fixed"
    #[serde(default = "default_location_source")]
    pub source: String,

    /// Latitude for the "fixed" source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Longitude for the "fixed" source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    /// How long a cached IP fix stays the last known position
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

/// Reverse geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Nominatim-compatible base URL
    #[serde(default = "default_geocoder_url")]
    pub url: String,

    /// Preferred address language (empty for the server default)
    #[serde(default)]
    pub language: String,

    /// User-Agent header sent with every lookup
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Map camera and URL settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Zoom level used when centering on the user's location
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// Default URL provider
    #[serde(default = "default_map_provider")]
    pub provider: String,

    /// URL provider templates
    #[serde(default = "default_map_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_location_source() -> String {
    DEFAULT_LOCATION_SOURCE.to_string()
}
fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}
fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}
fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}
fn default_map_provider() -> String {
    DEFAULT_MAP_PROVIDER.to_string()
}
fn default_map_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},{zoom}z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map={zoom}/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}&z={zoom}".to_string(),
    );
    providers
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            source: default_location_source(),
            lat: None,
            lng: None,
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: default_geocoder_url(),
            language: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            provider: default_map_provider(),
            providers: default_map_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string (empty when unset), or None if the key
    /// is unknown
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["permission", "auto_grant"] => Some(self.permission.auto_grant.to_string()),

            ["location", "source"] => Some(self.location.source.clone()),
            ["location", "lat"] => Some(optional_to_string(self.location.lat)),
            ["location", "lng"] => Some(optional_to_string(self.location.lng)),
            ["location", "cache_ttl_secs"] => Some(self.location.cache_ttl_secs.to_string()),

            ["geocoder", "url"] => Some(self.geocoder.url.clone()),
            ["geocoder", "language"] => Some(self.geocoder.language.clone()),
            ["geocoder", "user_agent"] => Some(self.geocoder.user_agent.clone()),

            ["map", "zoom"] => Some(self.map.zoom.to_string()),
            ["map", "provider"] => Some(self.map.provider.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["permission", "auto_grant"] => {
                self.permission.auto_grant = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }

            ["location", "source"] => match value {
                "ip" | "fixed" => self.location.source = value.to_string(),
                _ => {
                    return Err(Error::Config(format!(
                        "Unknown location source: {} (expected \"ip\" or \"fixed\")",
                        value
                    )));
                }
            },
            ["location", "lat"] => {
                self.location.lat = parse_optional(value, "latitude")?;
            }
            ["location", "lng"] => {
                self.location.lng = parse_optional(value, "longitude")?;
            }
            ["location", "cache_ttl_secs"] => {
                self.location.cache_ttl_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid cache TTL value: {}", value))
                })?;
            }

            ["geocoder", "url"] => {
                self.geocoder.url = value.trim_end_matches('/').to_string();
            }
            ["geocoder", "language"] => {
                self.geocoder.language = value.to_string();
            }
            ["geocoder", "user_agent"] => {
                self.geocoder.user_agent = value.to_string();
            }

            ["map", "zoom"] => {
                let zoom: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid zoom value: {}", value))
                })?;
                if !(0.0..=22.0).contains(&zoom) {
                    return Err(Error::Config(format!(
                        "Zoom {} is out of range [0, 22]",
                        zoom
                    )));
                }
                self.map.zoom = zoom;
            }
            ["map", "provider"] => {
                self.map.provider = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "permission.auto_grant",
            "location.source",
            "location.lat",
            "location.lng",
            "location.cache_ttl_secs",
            "geocoder.url",
            "geocoder.language",
            "geocoder.user_agent",
            "map.zoom",
            "map.provider",
        ]
    }

    /// The configured fixed position, if the "fixed" source is selected
    pub fn fixed_position(&self) -> Result<Option<Coordinates>> {
        if self.location.source != "fixed" {
            return Ok(None);
        }

        match (self.location.lat, self.location.lng) {
            (Some(lat), Some(lng)) => {
                let coords = Coordinates::new(lat, lng);
                coords.validate()?;
                Ok(Some(coords))
            }
            _ => Err(Error::Config(
                "location.source is \"fixed\" but location.lat/location.lng are not set"
                    .to_string(),
            )),
        }
    }

    /// Format a map URL using the specified provider
    ///
    /// Replaces {lat}, {lng} and {zoom} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, center: Coordinates, zoom: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.map.provider);

        let template = self.map.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &center.lat.to_string())
            .replace("{lng}", &center.lng.to_string())
            .replace("{zoom}", &zoom.to_string()))
    }
}

fn optional_to_string(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_optional(value: &str, what: &str) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(!config.permission.auto_grant);
        assert_eq!(config.location.source, "ip");
        assert_eq!(config.location.cache_ttl_secs, 3600);
        assert_eq!(config.geocoder.url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.map.zoom, 15.0);
        assert_eq!(config.map.provider, "openstreetmap");
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("permission.auto_grant"), Some("false".to_string()));
        config.set("permission.auto_grant", "true").unwrap();
        assert!(config.permission.auto_grant);

        assert_eq!(config.get("location.lat"), Some(String::new()));
        config.set("location.lat", "37.5").unwrap();
        assert_eq!(config.get("location.lat"), Some("37.5".to_string()));
        config.set("location.lat", "").unwrap();
        assert_eq!(config.location.lat, None);

        config.set("map.zoom", "12").unwrap();
        assert_eq!(config.map.zoom, 12.0);

        config.set("geocoder.url", "http://localhost:8080/").unwrap();
        assert_eq!(config.geocoder.url, "http://localhost:8080");
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("map.zoom", "close").is_err());
        assert!(config.set("map.zoom", "40").is_err());
        assert!(config.set("location.source", "gps").is_err());
        assert!(config.set("permission.auto_grant", "maybe").is_err());
    }

    #[test]
    fn test_fixed_position() {
        let mut config = Config::default();
        assert!(config.fixed_position().unwrap().is_none());

        config.set("location.source", "fixed").unwrap();
        assert!(config.fixed_position().is_err());

        config.set("location.lat", "37").unwrap();
        config.set("location.lng", "-122").unwrap();
        assert_eq!(
            config.fixed_position().unwrap(),
            Some(Coordinates::new(37.0, -122.0))
        );

        config.set("location.lat", "100").unwrap();
        assert!(config.fixed_position().is_err());
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();
        let center = Coordinates::new(37.0, -122.0);

        let url = config.format_url(Some("google"), center, 15.0).unwrap();
        assert_eq!(url, "https://www.google.com/maps/@37,-122,15z");

        let url = config.format_url(None, center, 15.0).unwrap();
        assert_eq!(url, "https://www.openstreetmap.org/#map=15/37/-122");
    }

    #[test]
    fn test_format_url_unknown_provider() {
        let config = Config::default();
        let result = config.format_url(Some("unknown"), Coordinates::new(0.0, 0.0), 15.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.permission.auto_grant = true;
            config.map.zoom = 11.0;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert!(loaded.permission.auto_grant);
            assert_eq!(loaded.map.zoom, 11.0);
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[map]\nzoom = 9.0\n").unwrap();
        assert_eq!(loaded.map.zoom, 9.0);
        assert_eq!(loaded.map.provider, "openstreetmap");
        assert_eq!(loaded.location.source, "ip");
        assert!(loaded.geocoder.user_agent.starts_with("location-info/"));
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[permission]"));
        assert!(toml.contains("[location]"));
        assert!(toml.contains("[geocoder]"));
        assert!(toml.contains("[map.providers]"));
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        let config = Config::default();
        for key in keys {
            assert!(config.get(key).is_some(), "key {} has no getter", key);
        }
    }
}
