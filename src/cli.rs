use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::comms::CommsState;
use crate::dialog::NativeDialogs;
use crate::host::HostContext;
use crate::server;

/// How long the startup paths wait for the subprocess port announcement.
const STARTUP_WAIT: Duration = Duration::from_secs(10);

#[derive(Debug, Parser)]
#[command(
    name = "voxview",
    version,
    about = "Host-side command and data bridge for a web-based volumetric image viewer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Runs the file-serving subprocess. Spawned by the host supervisor,
    /// not intended for direct use.
    #[command(hide = true)]
    FileServer,
    /// Launches a file server and prints the negotiated connection
    /// parameters as JSON.
    Comms,
    /// Launches the host services, loads the given volumes, and prints the
    /// resulting image-menu projection as JSON.
    Open { paths: Vec<PathBuf> },
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::FileServer => server::serve().map_err(|error| error.to_string()),
        Commands::Comms => {
            let comms = CommsState::new();
            let command = server::file_server_command().map_err(|error| error.to_string())?;
            let mut supervisor =
                server::Supervisor::start(command, &comms).map_err(|error| error.to_string())?;
            let info = comms.wait(STARTUP_WAIT).map_err(|error| error.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
            supervisor.shutdown();
            Ok(())
        }
        Commands::Open { paths } => {
            let context = HostContext::new(Arc::new(NativeDialogs));
            context.start().map_err(|error| error.to_string())?;
            let info = context
                .comms
                .wait(STARTUP_WAIT)
                .map_err(|error| error.to_string())?;
            tracing::info!(port = info.file_server_port, "file server ready");

            let paths: Vec<String> = paths
                .iter()
                .map(|path| path.display().to_string())
                .collect();
            context
                .load_volumes(paths)
                .map_err(|error| error.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&context.images_menu())
                    .map_err(|error| error.to_string())?
            );
            context.shutdown().map_err(|error| error.to_string())
        }
    }
}
