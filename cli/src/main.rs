//! hammertime - a basic CLI client to flintlock

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hammertime_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "hammertime_cli=debug"
    } else {
        "hammertime_cli=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
