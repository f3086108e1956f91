//! Last known location lookup

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::PositionSource;
use tracing::debug;

/// Wraps a position source's last known position query
#[derive(Debug)]
pub struct LocationResolver<P> {
    source: P,
}

impl<P: PositionSource> LocationResolver<P> {
    pub fn new(source: P) -> Self {
        Self { source }
    }

    /// The last known position, or `None`
    ///
    /// A source that refuses the caller (the grant was revoked after it was
    /// checked) or fails for any other reason yields `None`.
    pub async fn resolve_last_known(&self) -> Option<Coordinates> {
        match self.source.last_known_position().await {
            Ok(Some(coords)) => Some(coords),
            Ok(None) => {
                debug!("No last known position available");
                None
            }
            Err(Error::Unauthorized(reason)) => {
                debug!("Position source refused access: {}", reason);
                None
            }
            Err(e) => {
                debug!("Position lookup failed: {}", e);
                None
            }
        }
    }
}
