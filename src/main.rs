use tracing_subscriber::EnvFilter;

fn main() {
    // The file-server mode speaks JSON over stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = voxview::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
