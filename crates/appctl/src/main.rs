//! appctl binary entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use appctl::cli::Cli;
use appctl::client::HttpClient;
use appctl::commands::AppCommand;
use appctl::output::Formatter;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), appctl::CliError> {
    let client = HttpClient::new(cli.client_config())?;
    let formatter = Formatter::new(cli.format);
    let (action, args) = cli.command.invocation();

    let mut stdout = io::stdout().lock();
    AppCommand::new(&client, &formatter).execute(&mut stdout, action, &args)?;
    stdout.flush()?;
    Ok(())
}
