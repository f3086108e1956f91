//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default position source
pub const DEFAULT_LOCATION_SOURCE: &str = "ip";

/// Default lifetime of the cached last known position, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = crate::constants::cache::IP_LOCATION_TTL_SECS;

/// Default geocoder base URL
pub const DEFAULT_GEOCODER_URL: &str = crate::constants::api::NOMINATIM_URL;

/// Default camera zoom level
pub const DEFAULT_ZOOM: f64 = crate::constants::map::DEFAULT_ZOOM;

/// Default map URL provider
pub const DEFAULT_MAP_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "location-info";

/// User-Agent sent to the geocoder (Nominatim requires one)
pub fn default_user_agent() -> String {
    format!("location-info/{}", env!("CARGO_PKG_VERSION"))
}
