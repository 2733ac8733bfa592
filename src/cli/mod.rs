//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Command-line interface

pub mod virtio;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use vrouter_cni::Config;

use self::virtio::VirtioCommands;

#[derive(Parser, Debug)]
#[command(name = "vrouter-cni", version, about = "vRouter CNI interface config lifecycle")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "VROUTER_CNI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Base directory for per-container vhost-user socket directories
    #[arg(long, env = "VROUTER_SOCK_DIR", global = true)]
    pub sock_dir: Option<PathBuf>,

    /// Default log filter (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage virtio (vhost-user) interface configs
    #[command(subcommand)]
    Virtio(VirtioCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

impl Cli {
    /// Defaults, then the config file, then flags and environment.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(sock_dir) = &self.sock_dir {
            config.sock_dir = sock_dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }

        Ok(config)
    }
}

pub fn execute(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Virtio(cmd) => virtio::execute(cmd, config),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "vrouter-cni",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
