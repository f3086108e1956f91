//! Map screen
//!
//! This module handles:
//! - The render model handed to a map surface (camera, markers, status line)
//! - The `MapSurface` trait implemented by renderers
//! - The append-only set of markers dropped by tapping
//! - The view model that drives the screen (`viewmodel`)

pub mod terminal;
pub mod viewmodel;

use crate::constants::text::{CUSTOM_MARKER_TITLE, OWN_MARKER_TITLE};
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// Move the camera to `center` at `zoom`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportCommand {
    pub center: Coordinates,
    pub zoom: f64,
}

/// A marker as the surface draws it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDescriptor {
    pub position: Coordinates,
    pub title: String,
    pub snippet: String,
}

impl MarkerDescriptor {
    /// The user's own marker, labelled with their address
    pub fn own(position: Coordinates, address: &str) -> Self {
        Self {
            position,
            title: OWN_MARKER_TITLE.to_string(),
            snippet: address.to_string(),
        }
    }

    /// A tapped marker, labelled with its coordinates
    pub fn custom(position: Coordinates) -> Self {
        Self {
            position,
            title: CUSTOM_MARKER_TITLE.to_string(),
            snippet: position.label(),
        }
    }
}

/// One frame of the map screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Where the camera was sent, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<ViewportCommand>,

    /// Marker at the user's location, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_marker: Option<MarkerDescriptor>,

    /// Tapped markers in tap order
    pub markers: Vec<MarkerDescriptor>,

    /// Address text shown below the map
    pub address: String,
}

impl RenderState {
    /// The line shown below the map
    pub fn status_line(&self) -> String {
        format!("Your Location: {}", self.address)
    }
}

/// Rendering surface for the map screen
pub trait MapSurface {
    /// Move the visible viewport
    fn move_camera(&mut self, command: &ViewportCommand);

    /// Draw a frame
    fn render(&mut self, frame: &RenderState);

    /// Show a line of text outside the map (prompts, input errors)
    fn notice(&mut self, text: &str);
}

/// Markers dropped by tapping, in tap order
///
/// Append-only: markers are never removed or deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    markers: Vec<Coordinates>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coords: Coordinates) {
        self.markers.push(coords);
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinates> {
        self.markers.iter()
    }

    pub fn as_slice(&self) -> &[Coordinates] {
        &self.markers
    }
}
