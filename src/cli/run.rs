//! Run command handler
//!
//! Opens the interactive map screen on the terminal.

use crate::app::App;
use crate::cli::LocationArgs;
use crate::config::Config;
use crate::console::Console;
use crate::error::Result;
use crate::format::text::TextFormatter;
use crate::map::terminal::TerminalMap;
use crate::permission::terminal::TerminalBroker;
use crate::permission::PermissionGate;
use crate::session::{Exit, Session};
use clap::Args;
use tracing::info;

/// Run command arguments
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Map URL provider for camera moves (e.g. "google")
    #[arg(long)]
    pub provider: Option<String>,
}

/// Run the run command
pub async fn run(args: RunArgs) -> Result<()> {
    let config = Config::load()?;

    let console = Console::stdin();
    let broker = TerminalBroker::new(
        console.clone(),
        args.location.yes || config.permission.auto_grant,
    );
    let app = App::new(PermissionGate::new(broker), args.location.view_model(&config)?);
    let surface = TerminalMap::new(
        std::io::stdout(),
        Box::new(TextFormatter),
        config,
        args.provider,
    );

    info!("Starting location-info v{}", env!("CARGO_PKG_VERSION"));

    let mut session = Session::new(app, surface, console);
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    match session.run(shutdown).await? {
        Exit::Shutdown => info!("Interrupted, closing map screen"),
        exit => info!(?exit, "Session ended"),
    }

    Ok(())
}
