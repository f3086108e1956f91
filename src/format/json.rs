//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::RenderState;

/// JSON formatter - outputs the frame as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full frame as JSON"
    }

    fn format(&self, frame: &RenderState, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(frame)?)
    }
}
