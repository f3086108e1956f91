//! Map screen view model
//!
//! Owns everything the map screen shows: the user's resolved location, its
//! address text and the tapped markers. State lives only as long as the
//! view model does.

use crate::coord::Coordinates;
use crate::geo::{PositionSource, ReverseGeocoder};
use crate::map::{MapSurface, MarkerDescriptor, MarkerSet, RenderState, ViewportCommand};
use crate::resolver::{AddressResolver, AddressText, LocationResolver};
use tracing::{debug, info};

/// Lifecycle of the map screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Location and address not resolved yet
    Initializing,
    /// Resolution finished; taps are accepted
    Ready,
}

/// State and orchestration behind the map screen
#[derive(Debug)]
pub struct MapViewModel<P, G> {
    location: LocationResolver<P>,
    address: AddressResolver<G>,
    zoom: f64,
    phase: Phase,
    user_location: Option<Coordinates>,
    address_text: AddressText,
    markers: MarkerSet,
    viewport: Option<ViewportCommand>,
}

impl<P: PositionSource, G: ReverseGeocoder> MapViewModel<P, G> {
    /// Create a view model; `zoom` is used for the camera move to the user
    pub fn new(location: LocationResolver<P>, address: AddressResolver<G>, zoom: f64) -> Self {
        Self {
            location,
            address,
            zoom,
            phase: Phase::Initializing,
            user_location: None,
            address_text: AddressText::Pending,
            markers: MarkerSet::new(),
            viewport: None,
        }
    }

    /// Resolve location and address, center the camera, and go `Ready`
    ///
    /// `granted` is the permission state at the time of the call; without it
    /// no lookup is made. Results are committed together after the last
    /// suspension point, so dropping this future leaves the state untouched.
    /// Does nothing once `Ready`.
    pub async fn initialize<M: MapSurface>(&mut self, granted: bool, surface: &mut M) {
        if self.phase == Phase::Ready {
            return;
        }

        let location = if granted {
            self.location.resolve_last_known().await
        } else {
            debug!("Location permission not granted, skipping lookup");
            None
        };
        let address = self.address.resolve_address(location).await;

        self.user_location = location;
        self.address_text = address;

        if let Some(center) = location {
            let command = ViewportCommand {
                center,
                zoom: self.zoom,
            };
            surface.move_camera(&command);
            self.viewport = Some(command);
        }

        self.phase = Phase::Ready;
        info!(
            location = ?self.user_location,
            address = %self.address_text,
            "map screen ready"
        );
        surface.render(&self.render_state());
    }

    /// Drop a marker where the map was tapped
    ///
    /// Only the marker set changes. Returns false (and ignores the tap)
    /// while still initializing.
    pub fn on_tap<M: MapSurface>(&mut self, coords: Coordinates, surface: &mut M) -> bool {
        if self.phase != Phase::Ready {
            debug!("Ignoring tap at {} while initializing", coords);
            return false;
        }

        self.markers.push(coords);
        surface.render(&self.render_state());
        true
    }

    /// Current frame
    pub fn render_state(&self) -> RenderState {
        RenderState {
            camera: self.viewport,
            own_marker: self
                .user_location
                .map(|position| MarkerDescriptor::own(position, self.address_text.as_str())),
            markers: self.markers.iter().copied().map(MarkerDescriptor::custom).collect(),
            address: self.address_text.to_string(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    pub fn address(&self) -> &AddressText {
        &self.address_text
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// The camera move issued on initialization, if any
    pub fn viewport(&self) -> Option<ViewportCommand> {
        self.viewport
    }
}
