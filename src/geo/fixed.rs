//! Fixed position source
//!
//! Always reports the same coordinate. Used for `--lat/--lng` and the
//! "fixed" config source.

use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::PositionSource;

#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    coords: Coordinates,
}

impl FixedPosition {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

impl PositionSource for FixedPosition {
    async fn last_known_position(&self) -> Result<Option<Coordinates>> {
        Ok(Some(self.coords))
    }
}
