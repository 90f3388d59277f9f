pub mod bridge;
pub mod channel;
pub mod cli;
pub mod comms;
pub mod dialog;
pub mod drawing;
pub mod host;
pub mod menu;
pub mod server;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
