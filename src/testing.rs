//! Test doubles for the external services

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{AddressCandidate, PositionSource, ReverseGeocoder};
use crate::map::{MapSurface, RenderState, ViewportCommand};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn serve(app: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// What the fake position source reports
#[derive(Debug, Clone, Copy)]
pub enum Fix {
    At(Coordinates),
    NoFix,
    Unauthorized,
    Offline,
}

/// Position source with a canned answer that counts its calls
#[derive(Debug, Clone)]
pub struct FakePosition {
    fix: Fix,
    calls: Arc<AtomicUsize>,
}

impl FakePosition {
    pub fn new(fix: Fix) -> Self {
        Self {
            fix,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn at(lat: f64, lng: f64) -> Self {
        Self::new(Fix::At(Coordinates::new(lat, lng)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PositionSource for FakePosition {
    async fn last_known_position(&self) -> Result<Option<Coordinates>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fix {
            Fix::At(coords) => Ok(Some(coords)),
            Fix::NoFix => Ok(None),
            Fix::Unauthorized => Err(Error::Unauthorized("revoked".to_string())),
            Fix::Offline => Err(Error::Geo("network unreachable".to_string())),
        }
    }
}

/// What the fake geocoder answers
#[derive(Debug, Clone)]
pub enum Lookup {
    Lines(Vec<String>),
    Fault,
}

/// Geocoder with a canned answer that records its requests
#[derive(Debug, Clone)]
pub struct FakeGeocoder {
    lookup: Lookup,
    requests: Arc<Mutex<Vec<(Coordinates, usize)>>>,
}

impl FakeGeocoder {
    /// One candidate per line
    pub fn lines(lines: &[&str]) -> Self {
        Self::new(Lookup::Lines(lines.iter().map(|l| l.to_string()).collect()))
    }

    pub fn empty() -> Self {
        Self::new(Lookup::Lines(Vec::new()))
    }

    pub fn fault() -> Self {
        Self::new(Lookup::Fault)
    }

    fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(Coordinates, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

impl ReverseGeocoder for FakeGeocoder {
    async fn reverse_geocode(
        &self,
        coords: Coordinates,
        max_results: usize,
    ) -> Result<Vec<AddressCandidate>> {
        self.requests.lock().unwrap().push((coords, max_results));
        match &self.lookup {
            Lookup::Lines(lines) => Ok(lines
                .iter()
                .take(max_results)
                .map(|line| AddressCandidate::new(coords, line.clone()))
                .collect()),
            Lookup::Fault => Err(Error::Geocoding("provider unavailable".to_string())),
        }
    }
}

/// Everything a map surface was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Camera(ViewportCommand),
    Frame(RenderState),
    Notice(String),
}

/// Map surface that records instead of drawing
#[derive(Debug, Default)]
pub struct RecordingMap {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingMap {
    pub fn camera_moves(&self) -> Vec<ViewportCommand> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Camera(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }

    pub fn frames(&self) -> Vec<&RenderState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Frame(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    pub fn last_frame(&self) -> Option<&RenderState> {
        self.frames().into_iter().last()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notice(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl MapSurface for RecordingMap {
    fn move_camera(&mut self, command: &ViewportCommand) {
        self.events.push(SurfaceEvent::Camera(*command));
    }

    fn render(&mut self, frame: &RenderState) {
        self.events.push(SurfaceEvent::Frame(frame.clone()));
    }

    fn notice(&mut self, text: &str) {
        self.events.push(SurfaceEvent::Notice(text.to_string()));
    }
}
