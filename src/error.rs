//! Domain-specific error types for syncme.
//!
//! Library modules return the typed errors below; command handlers at the
//! CLI boundary convert them to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SyncmeError
//! ├── Config(ConfigError)     discovery, decoding, validation
//! ├── Host(HostError)         sync host resolution
//! └── Transfer(TransferError) rsync availability and invocation
//! ```
//!
//! Structural authoring mistakes (a sync without a name, a global host that
//! declares `paths`, ...) are *not* errors at the validator level: the
//! validators return `false` and log the cause. They only surface here as
//! [`ConfigError::Invalid`] once the whole pass has been rejected.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for syncme.
#[derive(Error, Debug)]
pub enum SyncmeError {
    /// Configuration discovery, decoding or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A sync host could not be resolved.
    #[error("Host resolution error: {0}")]
    Host(#[from] HostError),

    /// The transfer tool is unavailable or was invoked incorrectly.
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),
}

/// Errors that arise from locating, decoding and resolving the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// None of the candidate locations holds a regular file.
    #[error("config not found (searched: {searched})")]
    NotFound {
        /// Comma-separated list of the locations that were tried.
        searched: String,
    },

    /// The config file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid YAML.
    #[error("Invalid YAML in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying decoder error.
        source: serde_yaml::Error,
    },

    /// The document root is a scalar or a sequence.
    #[error("config root in {path} must be a mapping")]
    NotAMapping {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// One or more structural checks failed; causes were logged.
    #[error("config is invalid")]
    Invalid,

    /// A sync host could not be resolved while validating.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The validated tree did not match the typed configuration.
    #[error("failed to decode validated config: {0}")]
    Decode(#[source] serde_yaml::Error),
}

/// Hard failures while resolving a sync-scoped host.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HostError {
    /// Neither the host nor a matching global host provides an address.
    #[error("cannot resolve an address for host '{host}'")]
    UnresolvedAddress {
        /// The host name, or `<unnamed>` when the entry has none.
        host: String,
    },
}

/// Errors that arise from the external transfer tool.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Both endpoints of a transfer are remote.
    #[error("refusing to transfer between two remote endpoints: {source_endpoint} -> {dest_endpoint}")]
    BothRemote {
        /// Rendered source endpoint.
        source_endpoint: String,
        /// Rendered destination endpoint.
        dest_endpoint: String,
    },

    /// The transfer tool is not installed at the expected location.
    #[error("cannot find rsync at {}", path.display())]
    ToolMissing {
        /// Expected location of the executable.
        path: PathBuf,
    },

    /// The transfer tool could not be started.
    #[error("failed to execute {}: {source}", program.display())]
    Spawn {
        /// Program that failed to start.
        program: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_not_found_lists_locations() {
        let e = ConfigError::NotFound {
            searched: "/etc/syncme.yml".to_string(),
        };
        assert_eq!(e.to_string(), "config not found (searched: /etc/syncme.yml)");
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/home/u/.syncme.yml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/home/u/.syncme.yml"));
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_not_a_mapping_display() {
        let e = ConfigError::NotAMapping {
            path: PathBuf::from("/etc/syncme.yml"),
        };
        assert_eq!(e.to_string(), "config root in /etc/syncme.yml must be a mapping");
    }

    #[test]
    fn config_error_host_is_transparent() {
        let e: ConfigError = HostError::UnresolvedAddress {
            host: "nas".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "cannot resolve an address for host 'nas'");
    }

    // -----------------------------------------------------------------------
    // TransferError
    // -----------------------------------------------------------------------

    #[test]
    fn transfer_error_both_remote_display() {
        let e = TransferError::BothRemote {
            source_endpoint: "u@a:/x".to_string(),
            dest_endpoint: "u@b:/y".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "refusing to transfer between two remote endpoints: u@a:/x -> u@b:/y"
        );
    }

    #[test]
    fn transfer_error_tool_missing_display() {
        let e = TransferError::ToolMissing {
            path: PathBuf::from("/usr/bin/rsync"),
        };
        assert_eq!(e.to_string(), "cannot find rsync at /usr/bin/rsync");
    }

    // -----------------------------------------------------------------------
    // SyncmeError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn syncme_error_from_config_error() {
        let e: SyncmeError = ConfigError::Invalid.into();
        assert_eq!(e.to_string(), "Configuration error: config is invalid");
    }

    #[test]
    fn syncme_error_from_transfer_error() {
        let e: SyncmeError = TransferError::ToolMissing {
            path: PathBuf::from("/opt/rsync"),
        }
        .into();
        assert!(e.to_string().starts_with("Transfer error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<SyncmeError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<HostError>();
        assert_send_sync::<TransferError>();
    }

    #[test]
    fn config_error_converts_to_anyhow() {
        let e = ConfigError::Invalid;
        let _anyhow_err: anyhow::Error = e.into();
    }
}
