//! Config file discovery and YAML decoding.
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;
use crate::platform;

/// Environment variable naming an override config path.
pub const CONFIG_ENV: &str = "SYNCME_CONFIG";

/// Per-user config locations, searched after [`CONFIG_ENV`].
const USER_CONFIGS: &[&str] = &["~/.syncme.yml", "~/.config/syncme.yml"];

/// System-wide config location, searched last.
pub const SYSTEM_CONFIG: &str = "/etc/syncme.yml";

/// Inputs that decide where the config file is looked up.
///
/// [`ConfigSearch::from_env`] fills this in from the process environment;
/// tests build it directly.
#[derive(Debug, Clone, Default)]
pub struct ConfigSearch {
    /// Path given on the command line. When set, no other location is tried.
    pub explicit: Option<PathBuf>,
    /// Value of [`CONFIG_ENV`], before tilde expansion.
    pub env_override: Option<String>,
    /// Home directory used to expand `~`.
    pub home: Option<PathBuf>,
}

impl ConfigSearch {
    /// Build a search from the process environment.
    #[must_use]
    pub fn from_env(explicit: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            env_override: std::env::var(CONFIG_ENV).ok(),
            home: platform::home_dir(),
        }
    }

    /// Candidate locations in precedence order.
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return vec![explicit.clone()];
        }

        let home = self.home.as_deref();
        let mut candidates = Vec::new();
        if let Some(path) = self.env_override.as_deref().filter(|p| !p.is_empty()) {
            candidates.push(platform::expand_tilde(path, home));
        }
        candidates.extend(USER_CONFIGS.iter().map(|p| platform::expand_tilde(p, home)));
        candidates.push(PathBuf::from(SYSTEM_CONFIG));
        candidates
    }

    /// Return the first candidate that is a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no candidate exists.
    pub fn locate(&self) -> Result<PathBuf, ConfigError> {
        let candidates = self.candidates();
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                searched: candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Locate and decode the config file.
    ///
    /// Returns the raw mapping together with the path it was read from.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file exists, or if the file cannot be
    /// read or decoded.
    pub fn load(&self) -> Result<(Mapping, PathBuf), ConfigError> {
        let path = self.locate()?;
        tracing::debug!("loading config from {}", path.display());
        let raw = load_file(&path)?;
        Ok((raw, path))
    }
}

/// Read and decode one config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a YAML mapping.
pub fn load_file(path: &Path) -> Result<Mapping, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Decode YAML text into the raw config mapping.
///
/// A document with no content (blank or comments only) decodes to an empty
/// mapping. `path` is only used in error messages.
///
/// # Errors
///
/// Returns an error if `content` is not valid YAML or its root is not a
/// mapping.
pub fn parse(content: &str, path: &Path) -> Result<Mapping, ConfigError> {
    let blank = content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}
