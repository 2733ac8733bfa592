//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Deterministic naming for vhost-user sockets and vRouter interfaces

use thiserror::Error;

/// Number of leading container-id characters that go into derived names.
pub const CONTAINER_ID_PREFIX_LEN: usize = 12;

/// Extension of the per-interface marker file.
pub const CONF_FILE_EXT: &str = "conf";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Container id '{id}' is shorter than 12 characters")]
    ContainerIdTooShort { id: String },
    #[error("Invalid {field}: {reason}")]
    InvalidComponent { field: &'static str, reason: String },
    #[error("Path traversal detected in {field}: {value}")]
    PathTraversal { field: &'static str, value: String },
}

/// First twelve characters of the container id.
///
/// The truncation is part of the naming contract shared with the vRouter
/// agent. Two containers sharing a 12-character prefix collide. The prefix
/// ends up in the marker file name, so it must be a plain path component.
pub fn container_id_prefix(container_id: &str) -> Result<&str, ValidationError> {
    let prefix = match container_id.char_indices().nth(CONTAINER_ID_PREFIX_LEN) {
        Some((end, _)) => &container_id[..end],
        None if container_id.chars().count() == CONTAINER_ID_PREFIX_LEN => container_id,
        None => {
            return Err(ValidationError::ContainerIdTooShort {
                id: container_id.to_string(),
            })
        }
    };
    validate_path_component("container id", prefix)?;
    Ok(prefix)
}

/// Socket name for the vhost-user control channel: `<id[..12]>-<ifname>`.
pub fn build_sock_name(if_name: &str, container_id: &str) -> Result<String, ValidationError> {
    let prefix = container_id_prefix(container_id)?;
    Ok(format!("{prefix}-{if_name}"))
}

/// Interface name the vRouter uses for the vif: `vhost<ifname>-<id[..12]>`.
pub fn build_vhost_if_name(if_name: &str, container_id: &str) -> Result<String, ValidationError> {
    let prefix = container_id_prefix(container_id)?;
    Ok(format!("vhost{if_name}-{prefix}"))
}

/// File name of the marker for a socket name.
pub fn conf_file_name(sock_name: &str) -> String {
    format!("{sock_name}.{CONF_FILE_EXT}")
}

/// Validate a value that becomes a single path component (directory or file
/// name) under the socket directory.
pub fn validate_path_component(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::InvalidComponent {
            field,
            reason: "cannot be empty".to_string(),
        });
    }

    if value == "." || value == ".." || value.contains('/') || value.contains('\\') {
        return Err(ValidationError::PathTraversal {
            field,
            value: value.to_string(),
        });
    }

    if value.contains('\0') {
        return Err(ValidationError::InvalidComponent {
            field,
            reason: "contains a NUL byte".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "abcdef0123456789";

    #[test]
    fn test_example_names() {
        assert_eq!(build_sock_name("eth0", ID).unwrap(), "abcdef012345-eth0");
        assert_eq!(
            build_vhost_if_name("eth0", ID).unwrap(),
            "vhosteth0-abcdef012345"
        );
        assert_eq!(conf_file_name("abcdef012345-eth0"), "abcdef012345-eth0.conf");
    }

    #[test]
    fn test_names_are_deterministic() {
        let first = (build_sock_name("net1", ID), build_vhost_if_name("net1", ID));
        for _ in 0..3 {
            assert_eq!(build_sock_name("net1", ID), first.0);
            assert_eq!(build_vhost_if_name("net1", ID), first.1);
        }
    }

    #[test]
    fn test_prefix_boundaries() {
        assert_eq!(container_id_prefix("0123456789ab").unwrap(), "0123456789ab");
        assert_eq!(container_id_prefix("0123456789abc").unwrap(), "0123456789ab");
        // Counted in characters, never split inside a code point
        let wide = "é".repeat(13);
        assert_eq!(container_id_prefix(&wide).unwrap(), "é".repeat(12));
    }

    #[test]
    fn test_short_container_id_rejected() {
        let err = build_sock_name("eth0", "0123456789a").unwrap_err();
        assert_eq!(
            err,
            ValidationError::ContainerIdTooShort {
                id: "0123456789a".to_string()
            }
        );
        assert!(build_vhost_if_name("eth0", "").is_err());
    }

    #[test]
    fn test_container_id_prefix_must_stay_in_sock_dir() {
        let err = build_sock_name("eth0", "../../outside").unwrap_err();
        assert_eq!(
            err,
            ValidationError::PathTraversal {
                field: "container id",
                value: "../../outsid".to_string()
            }
        );
        assert!(build_vhost_if_name("eth0", "abc\\defghijkl").is_err());
        assert!(container_id_prefix("abcdef\0123456").is_err());
        // Only the derived prefix matters, not the tail of the id
        assert_eq!(container_id_prefix("abcdef012345/tail").unwrap(), "abcdef012345");
    }

    #[test]
    fn test_path_components() {
        assert!(validate_path_component("uuid", "uuid-1").is_ok());
        assert!(validate_path_component("uuid", "3f1c0b8e-8c7a-4f1e-9f6d-2a7e5b0c9d11").is_ok());
        assert!(validate_path_component("ifname", "eth0").is_ok());

        assert!(validate_path_component("uuid", "").is_err());
        assert!(validate_path_component("uuid", "..").is_err());
        assert!(validate_path_component("uuid", ".").is_err());
        assert!(validate_path_component("uuid", "../escape").is_err());
        assert!(validate_path_component("ifname", "a/b").is_err());
        assert!(validate_path_component("ifname", "a\\b").is_err());
        assert!(validate_path_component("ifname", "eth\00").is_err());
    }
}
