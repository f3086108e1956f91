//! Output formatters
//!
//! Provides trait-based output formatting for map frames.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::map::RenderState;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format one frame of the map screen
    ///
    /// # Arguments
    /// * `frame` - The frame to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, frame: &RenderState, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
        &url::UrlFormatter,
    ]
    .into_iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) fn sample_frame() -> RenderState {
    use crate::coord::Coordinates;
    use crate::map::{MarkerDescriptor, ViewportCommand};

    let here = Coordinates::new(37.0, -122.0);
    RenderState {
        camera: Some(ViewportCommand {
            center: here,
            zoom: 15.0,
        }),
        own_marker: Some(MarkerDescriptor::own(here, "1 Infinite Loop")),
        markers: vec![
            MarkerDescriptor::custom(Coordinates::new(1.0, 1.0)),
            MarkerDescriptor::custom(Coordinates::new(2.0, 2.0)),
        ],
        address: "1 Infinite Loop".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("url").is_some());
        assert!(get_formatter("gpx").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        for format in &formats {
            assert!(get_formatter(&format.name).is_some());
            assert!(!format.description.is_empty());
        }
    }
}
