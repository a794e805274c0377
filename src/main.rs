//! `set-sid-mapping`: add or remove custom SID to name mappings in the local LSA.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use win_sid_mapping::cli::Cli;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(windows)]
fn execute(cli: &Cli) -> Result<()> {
    let client = win_sid_mapping::lsa::LsaClient::local();
    let mut stdout = io::stdout().lock();
    win_sid_mapping::cli::run(cli, &client, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(not(windows))]
fn execute(cli: &Cli) -> Result<()> {
    use win_sid_mapping::cli::Invocation;

    if cli.invocation() == Invocation::Usage {
        let mut stdout = io::stdout().lock();
        win_sid_mapping::cli::write_usage(&mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }
    anyhow::bail!("SID name mappings are managed by the Windows LSA; this platform has none")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
