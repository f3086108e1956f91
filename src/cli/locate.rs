//! Locate command handler
//!
//! Resolves the location once, applies any taps given on the command line,
//! and prints a single frame.

use crate::app::App;
use crate::cli::LocationArgs;
use crate::config::Config;
use crate::console::Console;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use crate::geo::{PositionSource, ReverseGeocoder};
use crate::map::{MapSurface, RenderState, ViewportCommand};
use crate::permission::terminal::TerminalBroker;
use crate::permission::{PermissionBroker, PermissionGate};
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Drop a marker at LAT,LNG (repeatable)
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub tap: Vec<Coordinates>,

    /// Output format (text, json, url)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Map surface that keeps only the last frame
#[derive(Debug, Default)]
struct LastFrame {
    frame: Option<RenderState>,
}

impl MapSurface for LastFrame {
    fn move_camera(&mut self, _command: &ViewportCommand) {}

    fn render(&mut self, frame: &RenderState) {
        self.frame = Some(frame.clone());
    }

    fn notice(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let format = args.format.clone().unwrap_or_else(|| "text".to_string());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let broker = TerminalBroker::new(
        Console::stdin(),
        args.location.yes || config.permission.auto_grant,
    );
    let app = App::new(PermissionGate::new(broker), args.location.view_model(&config)?);

    let Some(frame) = locate(app, &args.tap).await else {
        eprintln!("{}", crate::constants::text::PERMISSION_REQUIRED);
        eprintln!("Run again with --yes, or answer 'y' when asked.");
        return Ok(());
    };

    let output = formatter.format(&frame, &config)?;
    write_output(&output, args.output.as_deref())
}

/// Ask for permission, resolve, tap; `None` when permission was denied
async fn locate<B, P, G>(mut app: App<B, P, G>, taps: &[Coordinates]) -> Option<RenderState>
where
    B: PermissionBroker,
    P: PositionSource,
    G: ReverseGeocoder,
{
    if !app.is_on_map() && !app.request_permission().await.is_granted() {
        return None;
    }

    let mut surface = LastFrame::default();
    app.open_map(&mut surface).await;
    for &coords in taps {
        app.tap(coords, &mut surface);
    }

    surface
        .frame
        .or_else(|| app.map().map(|vm| vm.render_state()))
}

fn write_output(output: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            eprintln!("Output written to {}", path);
        }
        None => println!("{}", output),
    }
    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:5} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::viewmodel::MapViewModel;
    use crate::permission::StaticBroker;
    use crate::resolver::{AddressResolver, LocationResolver};
    use crate::testing::{FakeGeocoder, FakePosition, Fix};
    use tempfile::TempDir;

    fn app(
        broker: StaticBroker,
        position: &FakePosition,
        geocoder: &FakeGeocoder,
    ) -> App<StaticBroker, FakePosition, FakeGeocoder> {
        App::new(
            PermissionGate::new(broker),
            MapViewModel::new(
                LocationResolver::new(position.clone()),
                AddressResolver::new(geocoder.clone()),
                15.0,
            ),
        )
    }

    #[tokio::test]
    async fn test_locate_with_taps() {
        let position = FakePosition::at(37.0, -122.0);
        let geocoder = FakeGeocoder::lines(&["1 Infinite Loop"]);
        let taps = [Coordinates::new(1.0, 1.0), Coordinates::new(2.0, 2.0)];

        let frame = locate(app(StaticBroker::granting(), &position, &geocoder), &taps)
            .await
            .unwrap();

        assert_eq!(frame.address, "1 Infinite Loop");
        assert_eq!(frame.camera.unwrap().zoom, 15.0);
        assert_eq!(frame.markers.len(), 2);
        assert_eq!(frame.markers[0].position, taps[0]);
    }

    #[tokio::test]
    async fn test_locate_denied() {
        let position = FakePosition::at(37.0, -122.0);
        let geocoder = FakeGeocoder::lines(&["1 Infinite Loop"]);

        let frame = locate(app(StaticBroker::denying(), &position, &geocoder), &[]).await;

        assert!(frame.is_none());
        assert_eq!(position.calls(), 0);
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_locate_without_fix() {
        let position = FakePosition::new(Fix::Unauthorized);
        let geocoder = FakeGeocoder::lines(&["1 Infinite Loop"]);

        let frame = locate(app(StaticBroker::granting(), &position, &geocoder), &[])
            .await
            .unwrap();

        assert_eq!(frame.address, "Unknown Location");
        assert!(frame.camera.is_none());
        assert!(frame.own_marker.is_none());
    }

    #[test]
    fn test_write_output_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("frame.txt");

        write_output("Your Location: here", Some(path.to_str().unwrap())).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Your Location: here");
    }
}
