//! Centralized constants for the location-info crate
//!
//! Values shared by several modules live here so the workflow, the
//! formatters and the adapters agree on them.

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Cache settings
pub mod cache {
    /// Last known position cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// Last known position cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "last_known_position.json";
}

/// Text shown on the screen
pub mod text {
    /// Placeholder before the address resolves
    pub const FETCHING_ADDRESS: &str = "Fetching Address...";

    /// No coordinate was available to geocode
    pub const UNKNOWN_LOCATION: &str = "Unknown Location";

    /// The geocoder returned no results
    pub const ADDRESS_NOT_FOUND: &str = "Address Not Found";

    /// The geocoder failed
    pub const ERROR_FETCHING_ADDRESS: &str = "Error Fetching Address";

    /// Title of the user's own marker
    pub const OWN_MARKER_TITLE: &str = "You are here";

    /// Title of markers dropped by tapping the map
    pub const CUSTOM_MARKER_TITLE: &str = "Custom Marker";

    /// Shown while the location permission is not granted
    pub const PERMISSION_REQUIRED: &str = "Location permission is required to use this app.";
}

/// Map settings
pub mod map {
    /// Zoom level of the camera move to the user's own location
    pub const DEFAULT_ZOOM: f64 = 15.0;
}

/// Geocoder settings
pub mod geocoder {
    /// Results requested from the reverse geocoder per lookup
    pub const MAX_RESULTS: usize = 1;
}
