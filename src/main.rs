//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! vrouter-cni command-line entry point

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_tracing(&config.log_level);
    tracing::debug!(?config, "Resolved configuration");

    cli::execute(cli, &config)
}

/// Log to stderr; stdout carries command output.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
