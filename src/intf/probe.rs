//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Filesystem existence probing

use std::io;
use std::path::Path;

/// Outcome of a successful existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Exists,
    Absent,
}

impl Presence {
    pub fn exists(self) -> bool {
        self == Presence::Exists
    }
}

/// Stat `path`, following symlinks.
///
/// Only `NotFound` maps to [`Presence::Absent`]. Any other stat failure
/// (permission denied, a non-directory in the middle of the path, I/O
/// errors) is returned so callers never mistake it for absence.
pub fn probe(path: &Path) -> io::Result<Presence> {
    match path.metadata() {
        Ok(_) => Ok(Presence::Exists),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "path does not exist");
            Ok(Presence::Absent)
        }
        Err(e) => Err(e),
    }
}
