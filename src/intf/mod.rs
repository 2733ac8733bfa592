//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! CNI interface kinds and the container identity they share

pub mod naming;
pub mod probe;
pub mod virtio;

use serde::Serialize;
use std::path::PathBuf;

use crate::error::Result;

pub use naming::{build_sock_name, build_vhost_if_name, validate_path_component, ValidationError};
pub use probe::{probe, Presence};
pub use virtio::{MarkerState, Virtio, DEFAULT_SOCK_DIR};

/// Identity of the container an interface is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CniIntf {
    container_id: String,
    container_uuid: String,
    container_if_name: String,
    container_namespace: String,
    mtu: u32,
}

impl CniIntf {
    pub fn new(
        container_id: impl Into<String>,
        container_uuid: impl Into<String>,
        container_if_name: impl Into<String>,
        container_namespace: impl Into<String>,
        mtu: u32,
    ) -> Self {
        Self {
            container_id: container_id.into(),
            container_uuid: container_uuid.into(),
            container_if_name: container_if_name.into(),
            container_namespace: container_namespace.into(),
            mtu,
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn container_uuid(&self) -> &str {
        &self.container_uuid
    }

    pub fn container_if_name(&self) -> &str {
        &self.container_if_name
    }

    pub fn container_namespace(&self) -> &str {
        &self.container_namespace
    }

    pub fn mtu(&self) -> u32 {
        self.mtu
    }
}

/// Operations every interface kind provides to the CNI command handlers.
pub trait CniInterface {
    /// Provision the host side of the interface.
    fn create(&self) -> Result<()>;

    /// Tear down whatever `create` left behind. Safe to call repeatedly.
    fn delete(&self) -> Result<()>;

    fn host_if_name(&self) -> &str;

    fn sock_name(&self) -> &str;

    fn sock_dir(&self) -> PathBuf;

    /// Emit the full descriptor for diagnostics.
    fn log(&self);
}
