//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Error types for interface lifecycle operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::intf::naming::ValidationError;

pub type Result<T> = std::result::Result<T, IntfError>;

#[derive(Error, Debug)]
pub enum IntfError {
    #[error("Invalid interface descriptor: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to stat {}: {source}", .path.display())]
    Probe { path: PathBuf, source: io::Error },

    #[error("Failed to create socket directory {}: {source}", .path.display())]
    DirectoryCreate { path: PathBuf, source: io::Error },

    /// The marker is already present; this is a double add.
    #[error("Interface config {} already present", .path.display())]
    AlreadyProvisioned { path: PathBuf },

    #[error("Failed to write interface config {}: {source}", .path.display())]
    FileWrite { path: PathBuf, source: io::Error },

    #[error("Failed to remove interface config {}: {source}", .path.display())]
    FileRemove { path: PathBuf, source: io::Error },

    #[error("Failed to remove socket directory {}: {source}", .path.display())]
    DirectoryRemove { path: PathBuf, source: io::Error },
}

impl IntfError {
    /// Path the failed operation was acting on, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            IntfError::Validation(_) => None,
            IntfError::Probe { path, .. }
            | IntfError::DirectoryCreate { path, .. }
            | IntfError::AlreadyProvisioned { path }
            | IntfError::FileWrite { path, .. }
            | IntfError::FileRemove { path, .. }
            | IntfError::DirectoryRemove { path, .. } => Some(path),
        }
    }
}
