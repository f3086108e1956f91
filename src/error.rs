//! Error types for location-info

use thiserror::Error;

/// Main error type for location-info operations
#[derive(Error, Debug)]
pub enum Error {
    /// The caller lacks the location capability
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Geo error: {0}")]
    Geo(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid input: {0}")]
    Input(String),
}

/// Result type alias for location-info operations
pub type Result<T> = std::result::Result<T, Error>;
