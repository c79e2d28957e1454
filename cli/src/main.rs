// secret: Application Entry Point
//
// Parses CLI arguments, initializes structured logging on stderr (stdout is
// reserved for command output), and dispatches to the command handler.

mod args;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Cli;

fn main() {
    // RUST_LOG=secret_store=debug for verbose output. Values and passphrases
    // are never logged at any level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("secret=warn,secret_store=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(commands::exit_code(&e));
    }
}
