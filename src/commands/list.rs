//! Command: print the resolved syncs.
use anyhow::Result;

use crate::cli::{GlobalOpts, ListOpts};
use crate::config::SyncConfig;
use crate::logging::Logger;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &ListOpts, log: &Logger) -> Result<()> {
    let config = super::load_config(global, log)?;
    let syncs = config.find_syncs(opts.sync_name.as_deref());
    if syncs.is_empty() {
        log.warn("no sync matches the selection");
    }
    print!("{}", render(&syncs));
    Ok(())
}

/// Render syncs as an indented outline, one blank line after each sync.
#[must_use]
pub fn render(syncs: &[&SyncConfig]) -> String {
    let mut lines = Vec::new();
    for sync in syncs {
        lines.push(format!("{}:", sync.name));
        lines.push("\tpaths:".to_string());
        lines.extend(sync.paths.iter().map(|p| format!("\t\t{p}")));
        lines.push("\thosts:".to_string());
        for host in &sync.hosts {
            lines.push(format!("\t\tname: {}", host.name));
            lines.push(format!("\t\taddress: {}", host.address));
            lines.push(format!("\t\tuser: {}", host.user.as_deref().unwrap_or("-")));
            lines.push("\t\tpaths:".to_string());
            lines.extend(host.paths.iter().map(|p| format!("\t\t\t{p}")));
        }
        lines.push("\ttags:".to_string());
        lines.extend(sync.tags.iter().map(|t| format!("\t\t{t}")));
        lines.push(String::new());
    }
    lines.into_iter().map(|line| line + "\n").collect()
}
