//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Virtio (vhost-user) interface config lifecycle
//!
//! The vRouter agent watches `<sock_dir>/<container_uuid>/` for
//! `<sock_name>.conf`. The file's presence reserves the vhost-user socket
//! slot; its content is never read.

use serde::Serialize;
use std::fmt;
use std::fs::{self, DirBuilder, OpenOptions, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use tracing::Span;

use super::naming::{self, conf_file_name, validate_path_component};
use super::probe::{probe, Presence};
use super::{CniInterface, CniIntf};
use crate::error::{IntfError, Result};

/// Base directory shared between the host, the vRouter agent and the pods.
pub const DEFAULT_SOCK_DIR: &str = "/var/run/vrouter/";

/// Per-container directory mode. Applied explicitly, the umask does not apply.
pub const SOCK_DIR_MODE: u32 = 0o777;

pub const CONF_FILE_MODE: u32 = 0o600;

const MARKER_CONTENT: &[u8] = b" ";

/// On-disk state of an interface's marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerState {
    Absent,
    /// Directory exists without a marker file.
    Partial,
    Present,
}

#[derive(Clone, Serialize)]
pub struct Virtio {
    #[serde(flatten)]
    intf: CniIntf,
    vhost_if_name: String,
    sock_name: String,
    base_sock_dir: PathBuf,
    #[serde(skip)]
    span: Span,
}

impl fmt::Debug for Virtio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Virtio")
            .field("intf", &self.intf)
            .field("vhost_if_name", &self.vhost_if_name)
            .field("sock_name", &self.sock_name)
            .field("base_sock_dir", &self.base_sock_dir)
            .finish_non_exhaustive()
    }
}

impl Virtio {
    /// Build the descriptor rooted at [`DEFAULT_SOCK_DIR`].
    pub fn new(intf: CniIntf) -> Result<Self> {
        Self::with_sock_dir(intf, DEFAULT_SOCK_DIR)
    }

    pub fn with_sock_dir(intf: CniIntf, base_sock_dir: impl Into<PathBuf>) -> Result<Self> {
        validate_path_component("container uuid", intf.container_uuid())?;
        validate_path_component("container interface name", intf.container_if_name())?;

        let vhost_if_name = naming::build_vhost_if_name(intf.container_if_name(), intf.container_id())?;
        let sock_name = naming::build_sock_name(intf.container_if_name(), intf.container_id())?;
        let span = tracing::info_span!(
            "virtio",
            container_uuid = %intf.container_uuid(),
            ifname = %intf.container_if_name(),
        );

        let intf = Self {
            intf,
            vhost_if_name,
            sock_name,
            base_sock_dir: base_sock_dir.into(),
            span,
        };
        intf.span.in_scope(|| tracing::info!(descriptor = ?intf, "Initialized virtio interface"));
        Ok(intf)
    }

    /// Log this interface's events under `parent` instead of the span that
    /// was current at construction.
    pub fn with_parent_span(mut self, parent: &Span) -> Self {
        self.span = tracing::info_span!(
            parent: parent,
            "virtio",
            container_uuid = %self.intf.container_uuid(),
            ifname = %self.intf.container_if_name(),
        );
        self
    }

    pub fn identity(&self) -> &CniIntf {
        &self.intf
    }

    pub fn base_sock_dir(&self) -> &Path {
        &self.base_sock_dir
    }

    /// Path of the marker file, `<sock_dir>/<sock_name>.conf`.
    pub fn conf_file(&self) -> PathBuf {
        self.sock_dir().join(conf_file_name(&self.sock_name))
    }

    pub fn status(&self) -> Result<MarkerState> {
        if !probe_path(&self.sock_dir())?.exists() {
            return Ok(MarkerState::Absent);
        }
        if probe_path(&self.conf_file())?.exists() {
            Ok(MarkerState::Present)
        } else {
            Ok(MarkerState::Partial)
        }
    }
}

impl CniInterface for Virtio {
    /// Create the socket directory if needed, then the marker file.
    ///
    /// A directory without a marker is reused. An existing marker is a
    /// double add and fails with [`IntfError::AlreadyProvisioned`], leaving
    /// the file untouched. Nothing is rolled back on failure.
    fn create(&self) -> Result<()> {
        let _enter = self.span.enter();
        tracing::info!("Creating virtio interface config");

        let sock_dir = self.sock_dir();
        let conf_file = self.conf_file();

        if probe_path(&sock_dir)?.exists() {
            tracing::debug!(sock_dir = %sock_dir.display(), "Socket directory already present");
        } else {
            create_sock_dir(&sock_dir)?;
        }

        if probe_path(&conf_file)?.exists() {
            tracing::error!(
                conf_file = %conf_file.display(),
                "Virtio interface config already present, refusing double add"
            );
            return Err(IntfError::AlreadyProvisioned { path: conf_file });
        }

        write_marker(&conf_file)?;

        tracing::info!(conf_file = %conf_file.display(), "Created virtio interface config");
        Ok(())
    }

    /// Remove the marker file and the socket directory, skipping whichever
    /// is already gone.
    fn delete(&self) -> Result<()> {
        let _enter = self.span.enter();
        tracing::info!("Deleting virtio interface config");

        let sock_dir = self.sock_dir();
        let conf_file = self.conf_file();

        if probe_path(&conf_file)?.exists() {
            tracing::info!(conf_file = %conf_file.display(), "Deleting virtio interface config file");
            fs::remove_file(&conf_file).map_err(|source| {
                tracing::error!(conf_file = %conf_file.display(), error = %source, "Deleting config file failed");
                IntfError::FileRemove {
                    path: conf_file.clone(),
                    source,
                }
            })?;
        }

        if probe_path(&sock_dir)?.exists() {
            tracing::info!(sock_dir = %sock_dir.display(), "Deleting socket directory");
            fs::remove_dir_all(&sock_dir).map_err(|source| {
                tracing::error!(sock_dir = %sock_dir.display(), error = %source, "Deleting socket directory failed");
                IntfError::DirectoryRemove {
                    path: sock_dir.clone(),
                    source,
                }
            })?;
        }

        tracing::info!(conf_file = %conf_file.display(), "Deleted virtio interface config");
        Ok(())
    }

    fn host_if_name(&self) -> &str {
        &self.vhost_if_name
    }

    fn sock_name(&self) -> &str {
        &self.sock_name
    }

    /// `<base_sock_dir>/<container_uuid>/`, trailing slash kept
    fn sock_dir(&self) -> PathBuf {
        self.base_sock_dir.join(format!("{}/", self.intf.container_uuid()))
    }

    fn log(&self) {
        self.span.in_scope(|| tracing::info!(descriptor = ?self, "virtio interface"));
    }
}

fn probe_path(path: &Path) -> Result<Presence> {
    probe(path).map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "stat failed");
        IntfError::Probe {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn create_sock_dir(dir: &Path) -> Result<()> {
    DirBuilder::new()
        .mode(SOCK_DIR_MODE)
        .create(dir)
        .and_then(|()| fs::set_permissions(dir, Permissions::from_mode(SOCK_DIR_MODE)))
        .map_err(|source| {
            tracing::error!(sock_dir = %dir.display(), error = %source, "Error creating socket directory");
            IntfError::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            }
        })
}

fn write_marker(path: &Path) -> Result<()> {
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(CONF_FILE_MODE)
        .open(path)
        .and_then(|mut file| file.write_all(MARKER_CONTENT));

    match written {
        Ok(()) => Ok(()),
        // Lost a race against another add between the probe and the open
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(IntfError::AlreadyProvisioned { path: path.to_path_buf() })
        }
        Err(source) => {
            tracing::error!(conf_file = %path.display(), error = %source, "Writing virtio interface config failed");
            Err(IntfError::FileWrite {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
