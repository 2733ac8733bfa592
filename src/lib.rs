//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! vRouter CNI: virtio (vhost-user) interface marker lifecycle
//!
//! For each virtio interface the plugin provisions, a per-container directory
//! and a `<sock_name>.conf` marker are created under the socket directory the
//! vRouter agent watches. See [`intf::Virtio`].

pub mod config;
pub mod error;
pub mod intf;

pub use config::{Config, ConfigError};
pub use error::{IntfError, Result};
pub use intf::{CniInterface, CniIntf, MarkerState, Virtio};
