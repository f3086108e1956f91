//! Interactive session
//!
//! Reads commands from the console and drives the application: granting
//! the permission, tapping the map, redrawing, quitting. Everything runs on
//! the caller's task, one step at a time.

use crate::app::App;
use crate::console::Console;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{PositionSource, ReverseGeocoder};
use crate::map::MapSurface;
use crate::permission::PermissionBroker;
use std::future::Future;
use std::str::FromStr;
use tracing::{debug, info};

const PROMPT_HELP: &str = "Type 'grant' to grant permission, or 'quit' to exit.";
const MAP_HELP: &str = "Commands: tap <lat> <lng>, show, quit";

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Press the "Grant Permission" button
    Grant,
    /// Tap the map at a position
    Tap(Coordinates),
    /// Redraw the current frame
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };

        match (word.to_lowercase().as_str(), rest) {
            ("grant" | "g", "") => Ok(Self::Grant),
            ("show" | "s", "") => Ok(Self::Show),
            ("help" | "?", "") => Ok(Self::Help),
            ("quit" | "q" | "exit", "") => Ok(Self::Quit),
            ("tap" | "t", "") => Err(Error::Input("tap needs a position: tap <lat> <lng>".to_string())),
            ("tap" | "t", position) => Ok(Self::Tap(position.parse()?)),
            _ => Err(Error::Input(format!("Unknown command: {}", s))),
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
    Shutdown,
}

/// An application bound to its input and its map surface
pub struct Session<B, P, G, M> {
    app: App<B, P, G>,
    surface: M,
    console: Console,
}

impl<B, P, G, M> Session<B, P, G, M>
where
    B: PermissionBroker,
    P: PositionSource,
    G: ReverseGeocoder,
    M: MapSurface,
{
    pub fn new(app: App<B, P, G>, surface: M, console: Console) -> Self {
        Self {
            app,
            surface,
            console,
        }
    }

    /// Run until the user quits, input ends, or `shutdown` resolves
    ///
    /// Pending work (a permission dialog, a location or address lookup) is
    /// abandoned on shutdown and renders nothing.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<Exit>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        if self.app.is_on_map() {
            tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(Exit::Shutdown),
                _ = self.app.open_map(&mut self.surface) => {}
            }
            self.surface.notice(MAP_HELP);
        } else {
            self.show_prompt();
        }

        loop {
            let line = tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(Exit::Shutdown),
                line = self.console.read_line() => line?,
            };

            let Some(line) = line else {
                debug!("Input closed");
                return Ok(Exit::EndOfInput);
            };
            if line.is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    self.surface.notice(&e.to_string());
                    continue;
                }
            };

            match command {
                Command::Quit => return Ok(Exit::Quit),
                Command::Help => self.show_help(),
                Command::Grant if self.app.is_on_map() => {
                    self.surface.notice("Location permission already granted.");
                }
                Command::Grant => {
                    let granted = tokio::select! {
                        biased;
                        _ = &mut shutdown => return Ok(Exit::Shutdown),
                        state = self.app.request_permission() => state.is_granted(),
                    };
                    if granted {
                        tokio::select! {
                            biased;
                            _ = &mut shutdown => return Ok(Exit::Shutdown),
                            _ = self.app.open_map(&mut self.surface) => {}
                        }
                        self.surface.notice(MAP_HELP);
                    } else {
                        self.show_prompt();
                    }
                }
                Command::Tap(coords) => {
                    if !self.app.tap(coords, &mut self.surface) {
                        self.show_prompt();
                    } else {
                        info!("Marker dropped at {}", coords);
                    }
                }
                Command::Show => match self.app.map() {
                    Some(vm) => {
                        let frame = vm.render_state();
                        self.surface.render(&frame);
                    }
                    None => self.show_prompt(),
                },
            }
        }
    }

    fn show_prompt(&mut self) {
        let text = self.app.prompt_text();
        self.surface.notice(text);
        self.surface.notice(PROMPT_HELP);
    }

    fn show_help(&mut self) {
        let help = if self.app.is_on_map() { MAP_HELP } else { PROMPT_HELP };
        self.surface.notice(help);
    }

    pub fn app(&self) -> &App<B, P, G> {
        &self.app
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }
}
