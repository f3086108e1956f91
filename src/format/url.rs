//! URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::map::RenderState;

/// URL formatter - outputs a map URL for the camera position
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        frame: &RenderState,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        match &frame.camera {
            Some(camera) => config.format_url(provider, camera.center, camera.zoom),
            None => Err(Error::Render(
                "No location was resolved, so the map has no position to link to".to_string(),
            )),
        }
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the resolved location"
    }

    fn format(&self, frame: &RenderState, config: &Config) -> Result<String> {
        self.format_with_provider(frame, config, None)
    }
}
