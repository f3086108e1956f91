//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::{MarkerDescriptor, RenderState};

/// Text formatter - outputs the markers and the status line
pub struct TextFormatter;

impl TextFormatter {
    fn marker_line(marker: &MarkerDescriptor) -> String {
        format!(
            "  [{}] ({:.6}, {:.6}) {}\n",
            marker.title, marker.position.lat, marker.position.lng, marker.snippet
        )
    }
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, frame: &RenderState, _config: &Config) -> Result<String> {
        let mut output = String::new();

        if frame.own_marker.is_some() || !frame.markers.is_empty() {
            output.push_str("Markers:\n");
        }
        if let Some(own) = &frame.own_marker {
            output.push_str(&Self::marker_line(own));
        }
        for marker in &frame.markers {
            output.push_str(&Self::marker_line(marker));
        }

        output.push_str(&frame.status_line());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_frame;

    #[test]
    fn test_text_format() {
        let output = TextFormatter
            .format(&sample_frame(), &Config::default())
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Markers:");
        assert_eq!(lines[1], "  [You are here] (37.000000, -122.000000) 1 Infinite Loop");
        assert_eq!(lines[2], "  [Custom Marker] (1.000000, 1.000000) Lat: 1, Lng: 1");
        assert_eq!(lines[3], "  [Custom Marker] (2.000000, 2.000000) Lat: 2, Lng: 2");
        assert_eq!(lines[4], "Your Location: 1 Infinite Loop");
    }

    #[test]
    fn test_text_format_without_markers() {
        let frame = RenderState {
            camera: None,
            own_marker: None,
            markers: Vec::new(),
            address: "Unknown Location".to_string(),
        };
        let output = TextFormatter.format(&frame, &Config::default()).unwrap();
        assert_eq!(output, "Your Location: Unknown Location");
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
