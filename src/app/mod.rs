//! Top-level screen switch
//!
//! Shows the permission prompt until the location capability is granted,
//! then the map screen. The switch happens once and is never undone.

use crate::constants::text::PERMISSION_REQUIRED;
use crate::coord::Coordinates;
use crate::geo::{PositionSource, ReverseGeocoder};
use crate::map::viewmodel::MapViewModel;
use crate::map::MapSurface;
use crate::permission::{PermissionBroker, PermissionGate, PermissionState};
use tracing::info;

/// What the application is showing
#[derive(Debug)]
pub enum Screen<P, G> {
    PermissionPrompt,
    Map(MapViewModel<P, G>),
}

/// The application: a permission gate in front of one map screen
#[derive(Debug)]
pub struct App<B, P, G> {
    gate: PermissionGate<B>,
    screen: Screen<P, G>,
    waiting: Option<MapViewModel<P, G>>,
}

impl<B, P, G> App<B, P, G>
where
    B: PermissionBroker,
    P: PositionSource,
    G: ReverseGeocoder,
{
    /// Start on the map screen if already granted, on the prompt otherwise
    pub fn new(gate: PermissionGate<B>, map: MapViewModel<P, G>) -> Self {
        if gate.state().is_granted() {
            Self {
                gate,
                screen: Screen::Map(map),
                waiting: None,
            }
        } else {
            Self {
                gate,
                screen: Screen::PermissionPrompt,
                waiting: Some(map),
            }
        }
    }

    pub fn screen(&self) -> &Screen<P, G> {
        &self.screen
    }

    pub fn permission(&self) -> PermissionState {
        self.gate.state()
    }

    pub fn is_on_map(&self) -> bool {
        matches!(self.screen, Screen::Map(_))
    }

    /// The map screen's view model, once shown
    pub fn map(&self) -> Option<&MapViewModel<P, G>> {
        match &self.screen {
            Screen::Map(vm) => Some(vm),
            Screen::PermissionPrompt => None,
        }
    }

    /// Text of the permission prompt
    pub fn prompt_text(&self) -> &'static str {
        PERMISSION_REQUIRED
    }

    /// Ask for the location capability; switch to the map when granted
    pub async fn request_permission(&mut self) -> PermissionState {
        let state = self.gate.request_grant().await;
        if state.is_granted() {
            if let Some(map) = self.waiting.take() {
                info!("location permission granted, showing map");
                self.screen = Screen::Map(map);
            }
        }
        state
    }

    /// Initialize the map screen; nothing happens on the prompt
    pub async fn open_map<M: MapSurface>(&mut self, surface: &mut M) {
        let granted = self.gate.check_granted();
        if let Screen::Map(vm) = &mut self.screen {
            vm.initialize(granted, surface).await;
        }
    }

    /// Forward a map tap; ignored on the prompt
    pub fn tap<M: MapSurface>(&mut self, coords: Coordinates, surface: &mut M) -> bool {
        match &mut self.screen {
            Screen::Map(vm) => vm.on_tap(coords, surface),
            Screen::PermissionPrompt => false,
        }
    }
}
