//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Virtio interface commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use vrouter_cni::{CniInterface, CniIntf, Config, Virtio};

#[derive(Subcommand, Debug, Clone)]
pub enum VirtioCommands {
    /// Create the socket directory and interface config file
    Add(InterfaceArgs),

    /// Remove the interface config file and socket directory
    Del(InterfaceArgs),

    /// Show derived names, paths and on-disk state
    Inspect(InterfaceArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InterfaceArgs {
    /// Container id (at least 12 characters)
    #[arg(long)]
    pub container_id: String,

    /// Container (pod) UUID
    #[arg(long)]
    pub container_uuid: String,

    /// Interface name inside the container
    #[arg(long, default_value = "eth0")]
    pub ifname: String,

    /// Container network namespace
    #[arg(long, default_value = "")]
    pub namespace: String,

    /// Interface MTU
    #[arg(long, default_value_t = 1500)]
    pub mtu: u32,
}

impl InterfaceArgs {
    fn build(&self, config: &Config) -> Result<Virtio> {
        let intf = CniIntf::new(
            &self.container_id,
            &self.container_uuid,
            &self.ifname,
            &self.namespace,
            self.mtu,
        );
        Virtio::with_sock_dir(intf, &config.sock_dir).context("Invalid virtio interface")
    }
}

pub fn execute(cmd: VirtioCommands, config: &Config) -> Result<()> {
    match cmd {
        VirtioCommands::Add(args) => add_interface(&args, config),
        VirtioCommands::Del(args) => delete_interface(&args, config),
        VirtioCommands::Inspect(args) => inspect_interface(&args, config),
    }
}

fn add_interface(args: &InterfaceArgs, config: &Config) -> Result<()> {
    let virtio = args.build(config)?;
    let intf: &dyn CniInterface = &virtio;

    intf.create()
        .with_context(|| format!("Failed to add virtio interface {}", intf.host_if_name()))?;

    println!("{}", virtio.conf_file().display());
    Ok(())
}

fn delete_interface(args: &InterfaceArgs, config: &Config) -> Result<()> {
    let virtio = args.build(config)?;
    let intf: &dyn CniInterface = &virtio;

    intf.delete()
        .with_context(|| format!("Failed to delete virtio interface {}", intf.host_if_name()))?;

    println!("{}", intf.sock_name());
    Ok(())
}

fn inspect_interface(args: &InterfaceArgs, config: &Config) -> Result<()> {
    let virtio = args.build(config)?;
    virtio.log();

    let state = virtio.status().context("Failed to read interface state")?;

    let output = serde_json::json!({
        "Interface": virtio,
        "VhostIfName": virtio.host_if_name(),
        "SockName": virtio.sock_name(),
        "SockDir": virtio.sock_dir(),
        "ConfFile": virtio.conf_file(),
        "State": state,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
