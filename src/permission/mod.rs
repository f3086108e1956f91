//! Location permission
//!
//! This module defines the `PermissionBroker` trait (the platform side that
//! knows whether a capability is granted and can ask the user for it) and the
//! `PermissionGate` that every location or address lookup is gated on.

pub mod terminal;

use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// An OS-mediated capability the application can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Access to the device's precise location
    FineLocation,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FineLocation => write!(f, "fine_location"),
        }
    }
}

/// Grant state of the location capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not asked yet, or a new request is in flight
    #[default]
    Unknown,
    Denied,
    Granted,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Platform side of the permission dialog
pub trait PermissionBroker: Send + Sync {
    /// Non-blocking query of the current grant
    fn has_capability(&self, capability: Capability) -> bool;

    /// Ask the user; resolves once they answer
    ///
    /// Implementations return only `Granted` or `Denied`.
    fn request_capability(
        &self,
        capability: Capability,
    ) -> impl Future<Output = PermissionState> + Send;
}

/// Broker with a fixed answer
///
/// Backs `--yes` and tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticBroker {
    granted: bool,
}

impl StaticBroker {
    pub fn granting() -> Self {
        Self { granted: true }
    }

    pub fn denying() -> Self {
        Self { granted: false }
    }
}

impl PermissionBroker for StaticBroker {
    fn has_capability(&self, _capability: Capability) -> bool {
        self.granted
    }

    async fn request_capability(&self, _capability: Capability) -> PermissionState {
        if self.granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }
}

/// Tracks the location grant and requests it when asked to
#[derive(Debug)]
pub struct PermissionGate<B> {
    broker: B,
    state: PermissionState,
}

impl<B: PermissionBroker> PermissionGate<B> {
    /// Create a gate, picking up a grant the broker already holds
    pub fn new(broker: B) -> Self {
        let state = if broker.has_capability(Capability::FineLocation) {
            PermissionState::Granted
        } else {
            PermissionState::Unknown
        };
        Self { broker, state }
    }

    /// Current state as last observed by the gate
    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Whether the broker grants location access right now
    pub fn check_granted(&self) -> bool {
        self.broker.has_capability(Capability::FineLocation)
    }

    /// Ask for the location capability
    ///
    /// A request after a denial is an explicit user action and starts over
    /// from `Unknown`.
    pub async fn request_grant(&mut self) -> PermissionState {
        if self.state.is_granted() {
            return self.state;
        }

        self.state = PermissionState::Unknown;
        let answer = self
            .broker
            .request_capability(Capability::FineLocation)
            .await;

        // Brokers only answer granted or denied.
        self.state = match answer {
            PermissionState::Granted => PermissionState::Granted,
            _ => PermissionState::Denied,
        };
        debug!(state = ?self.state, "location permission answered");
        self.state
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }
}
