//! Top-level subcommand orchestration (`list`, `push`, `pull`).
pub mod list;
pub mod transfer;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Logger;

/// Locate, decode and resolve the configuration for a command.
///
/// # Errors
///
/// Returns an error if no config file is found, it cannot be decoded, or it
/// fails validation.
pub fn load_config(global: &GlobalOpts, log: &Logger) -> Result<Config> {
    let (config, path) = Config::load(global.config.as_deref())?;
    log.debug(&format!("config: {}", path.display()));
    log.debug(&format!("{} global hosts", config.hosts.len()));
    log.debug(&format!("{} syncs", config.syncs.len()));
    Ok(config)
}
