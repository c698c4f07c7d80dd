use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gantry::cli::Cli;
use gantry::cmd;
use gantry::error::GantryError;

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match cmd::dispatch(cli) {
        Ok(output) => {
            output.print();
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<GantryError>() {
                // Domain errors are user mistakes; the message alone is
                // the answer.
                Some(domain) => eprintln!("{domain}"),
                // Anything else is a defect; keep the full chain.
                None => eprintln!("error: {err:?}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays parseable.
///
/// Quiet by default; set RUST_LOG to raise verbosity.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
