//! Terminal permission dialog
//!
//! Asks the user on the shared console. A grant lasts for the rest of the
//! session; the config can pre-grant.

use crate::console::Console;
use crate::permission::{Capability, PermissionBroker, PermissionState};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Permission broker that asks a yes/no question on the console
#[derive(Debug)]
pub struct TerminalBroker {
    console: Console,
    granted: AtomicBool,
}

impl TerminalBroker {
    /// Create a broker; `pre_granted` skips the question entirely
    pub fn new(console: Console, pre_granted: bool) -> Self {
        Self {
            console,
            granted: AtomicBool::new(pre_granted),
        }
    }

    fn is_yes(answer: &str) -> bool {
        matches!(answer.to_lowercase().as_str(), "y" | "yes")
    }
}

impl PermissionBroker for TerminalBroker {
    fn has_capability(&self, _capability: Capability) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    async fn request_capability(&self, capability: Capability) -> PermissionState {
        if self.has_capability(capability) {
            return PermissionState::Granted;
        }

        eprintln!("Allow location-info to access this device's location? [y/N]");

        let answer = match self.console.read_line().await {
            Ok(line) => line.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read permission answer: {}", e);
                String::new()
            }
        };

        if Self::is_yes(&answer) {
            self.granted.store(true, Ordering::SeqCst);
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }
}
