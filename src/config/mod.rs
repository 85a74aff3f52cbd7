//! Configuration resolution: discovery, validation, and the typed result.
//!
//! The pipeline is
//!
//! ```text
//! file ─▶ loader ─▶ raw Mapping ─▶ validation (in place) ─▶ Config
//! ```
//!
//! Validation works on the raw [`Mapping`] so that hosts keep every field
//! they were given; the typed structs below carry those extra fields in
//! their `extra` maps.
pub mod hosts;
pub mod loader;
pub mod paths;
pub mod record;
pub mod select;
pub mod validation;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Default `recursive` flag for syncs.
    pub recursive: bool,
    /// Default rsync options for syncs.
    pub tags: Vec<String>,
    /// Named host templates.
    pub hosts: Vec<GlobalHost>,
    /// Sync definitions, in file order.
    pub syncs: Vec<SyncConfig>,
}

/// A named host template that sync hosts can inherit from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlobalHost {
    /// Lowercased name; defaults to the address.
    pub name: String,
    /// Hostname or IP address.
    pub address: String,
    /// Remote user.
    #[serde(default)]
    pub user: Option<String>,
    /// Passthrough fields.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named group of local paths and the hosts they are mirrored to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyncConfig {
    /// Lowercased, unique-by-convention name.
    pub name: String,
    /// Local paths, in order.
    pub paths: Vec<String>,
    /// Options passed verbatim to rsync.
    pub tags: Vec<String>,
    /// Whether rsync runs with `-r`.
    pub recursive: bool,
    /// Remote endpoints of this sync.
    pub hosts: Vec<HostConfig>,
    /// Passthrough fields.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// One remote endpoint of a sync.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostConfig {
    /// Lowercased name; defaults to the lowercased address.
    pub name: String,
    /// Hostname or IP address.
    pub address: String,
    /// Remote user; `None` only when the OS user is unknown.
    #[serde(default)]
    pub user: Option<String>,
    /// Remote paths, position-aligned with the sync's paths.
    pub paths: Vec<String>,
    /// Passthrough and inherited fields.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Config {
    /// Validate a raw decoded tree and convert it into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a structural check failed (the
    /// cause has been logged), [`ConfigError::Host`] if a sync host has no
    /// resolvable address, and [`ConfigError::Decode`] if the validated tree
    /// does not fit the typed model.
    pub fn resolve(mut raw: Mapping) -> Result<Self, ConfigError> {
        if !validation::validate_config(&mut raw)? {
            return Err(ConfigError::Invalid);
        }
        serde_yaml::from_value(Value::Mapping(raw)).map_err(ConfigError::Decode)
    }

    /// Locate, decode and resolve the config file.
    ///
    /// Returns the configuration and the path it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be found, read, decoded or
    /// validated.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let (raw, path) = loader::ConfigSearch::from_env(explicit).load()?;
        Ok((Self::resolve(raw)?, path))
    }
}
