//! Name-based selection of syncs and hosts.
use super::{Config, HostConfig, SyncConfig};

/// Selector that matches every sync or host. Reserved as a sync name.
pub const WILDCARD: &str = "all";

/// Return `true` if an entry named `name` is selected by `query`.
///
/// A missing query and the wildcard select everything; otherwise the query
/// is lowercased and compared with the (already lowercased) stored name.
fn selects(query: Option<&str>, name: &str) -> bool {
    match query {
        None => true,
        Some(q) if q.eq_ignore_ascii_case(WILDCARD) => true,
        Some(q) => q.to_lowercase() == name,
    }
}

impl Config {
    /// Return the syncs selected by `name`, in configuration order.
    ///
    /// Sync names are not required to be unique, so several syncs may match.
    #[must_use]
    pub fn find_syncs(&self, name: Option<&str>) -> Vec<&SyncConfig> {
        self.syncs.iter().filter(|s| selects(name, &s.name)).collect()
    }
}

impl SyncConfig {
    /// Return the hosts of this sync selected by `name`, in configuration order.
    #[must_use]
    pub fn find_hosts(&self, name: Option<&str>) -> Vec<&HostConfig> {
        self.hosts.iter().filter(|h| selects(name, &h.name)).collect()
    }
}
