//! Text map surface
//!
//! Prints camera moves as map links and frames through an output
//! formatter.

use crate::config::Config;
use crate::format::OutputFormatter;
use crate::map::{MapSurface, RenderState, ViewportCommand};
use std::io::Write;
use tracing::warn;

/// Map surface writing to a terminal (or any writer)
pub struct TerminalMap<W> {
    out: W,
    formatter: Box<dyn OutputFormatter>,
    config: Config,
    provider: Option<String>,
}

impl<W: Write> TerminalMap<W> {
    /// `provider` overrides the configured map URL provider
    pub fn new(
        out: W,
        formatter: Box<dyn OutputFormatter>,
        config: Config,
        provider: Option<String>,
    ) -> Self {
        Self {
            out,
            formatter,
            config,
            provider,
        }
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Failed to write to map surface: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MapSurface for TerminalMap<W> {
    fn move_camera(&mut self, command: &ViewportCommand) {
        let line = match self.config.format_url(
            self.provider.as_deref(),
            command.center,
            command.zoom,
        ) {
            Ok(url) => format!(
                "Camera: {} at zoom {} ({})",
                command.center, command.zoom, url
            ),
            Err(e) => {
                warn!("{}", e);
                format!("Camera: {} at zoom {}", command.center, command.zoom)
            }
        };
        self.write_line(&line);
    }

    fn render(&mut self, frame: &RenderState) {
        match self.formatter.format(frame, &self.config) {
            Ok(text) => self.write_line(&text),
            Err(e) => warn!("Failed to format frame: {}", e),
        }
    }

    fn notice(&mut self, text: &str) {
        self.write_line(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::format::sample_frame;
    use crate::format::text::TextFormatter;

    fn map(provider: Option<&str>) -> TerminalMap<Vec<u8>> {
        TerminalMap::new(
            Vec::new(),
            Box::new(TextFormatter),
            Config::default(),
            provider.map(str::to_string),
        )
    }

    fn output(map: TerminalMap<Vec<u8>>) -> String {
        String::from_utf8(map.into_inner()).unwrap()
    }

    #[test]
    fn test_camera_line_with_url() {
        let mut surface = map(None);
        surface.move_camera(&ViewportCommand {
            center: Coordinates::new(37.0, -122.0),
            zoom: 15.0,
        });
        assert_eq!(
            output(surface),
            "Camera: (37, -122) at zoom 15 (https://www.openstreetmap.org/#map=15/37/-122)\n"
        );
    }

    #[test]
    fn test_unknown_provider_still_moves_camera() {
        let mut surface = map(Some("nowhere"));
        surface.move_camera(&ViewportCommand {
            center: Coordinates::new(1.0, 2.0),
            zoom: 15.0,
        });
        assert_eq!(output(surface), "Camera: (1, 2) at zoom 15\n");
    }

    #[test]
    fn test_render_and_notice() {
        let mut surface = map(None);
        surface.notice("hello");
        surface.render(&sample_frame());

        let text = output(surface);
        assert!(text.starts_with("hello\n"));
        assert!(text.ends_with("Your Location: 1 Infinite Loop\n"));
    }
}
