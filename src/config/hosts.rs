//! Global host validation and sync host resolution.
//!
//! A sync host refers to a global host by name. Fields missing on the sync
//! host are inherited from the global host, then the host's path overrides
//! are aligned with the owning sync's paths.
use serde_yaml::{Mapping, Value};

use super::paths::fix_host_paths;
use super::record::{Record, scalar_string};
use crate::error::HostError;
use crate::platform;

/// Fill missing fields of `host` from the first global host with the same
/// name.
///
/// Names are compared exactly, so both sides must already be lowercased.
/// Fields already present on `host` always win. Without a name or a match
/// this is a no-op.
pub fn merge_host(global_hosts: &[Value], host: &mut Mapping) {
    let Some(name) = host.string("name") else {
        return;
    };
    let matched = global_hosts
        .iter()
        .filter_map(Value::as_mapping)
        .find(|global| global.string("name").as_deref() == Some(name.as_str()));
    if let Some(global) = matched {
        host.fill_from(global);
    }
}

/// Validate and normalize one entry of the top-level `hosts` list.
///
/// Returns `false` (and logs why) if the host has no `address` or declares
/// `paths`, which only sync hosts may carry. Otherwise defaults `name` to the
/// address and lowercases it.
pub fn validate_global_host(host: &mut Mapping) -> bool {
    let Some(address) = host.string("address") else {
        tracing::error!("global host {} has no address", describe(host));
        return false;
    };
    if host.has("paths") {
        tracing::error!(
            "global host {} declares paths; paths belong to hosts inside a sync",
            describe(host)
        );
        return false;
    }

    host.set("address", address.as_str());
    let name = host.string("name").unwrap_or(address);
    host.set("name", name.to_lowercase());
    stringify_user(host);
    true
}

/// Resolve one host entry of a sync.
///
/// Lowercases the name and merges the matching global host, defaults `name`
/// to the lowercased address and `user` to the current OS user, then
/// replaces `paths` with one resolved destination per entry of
/// `sync_paths`.
///
/// # Errors
///
/// Returns [`HostError::UnresolvedAddress`] if neither the host nor a
/// matching global host provides an address.
pub fn validate_host(
    host: &mut Mapping,
    sync_paths: &[String],
    global_hosts: &[Value],
) -> Result<(), HostError> {
    if let Some(name) = host.string("name") {
        host.set("name", name.to_lowercase());
        merge_host(global_hosts, host);
    }

    let Some(address) = host.string("address") else {
        return Err(HostError::UnresolvedAddress {
            host: host.string("name").unwrap_or_else(|| "<unnamed>".to_string()),
        });
    };
    host.set("address", address.as_str());
    host.set_default("name", address.to_lowercase());

    if host.has("user") {
        stringify_user(host);
    } else if let Some(user) = platform::current_user() {
        host.set("user", user);
    }

    let overrides = path_overrides(host, sync_paths);
    host.set("paths", fix_host_paths(&overrides, sync_paths));
    Ok(())
}

/// Collect the host's path overrides, truncated to the sync's length.
///
/// A `null` entry means "no override" and is replaced by the sync path at
/// the same position.
fn path_overrides(host: &Mapping, sync_paths: &[String]) -> Vec<String> {
    let Some(paths) = host.field("paths") else {
        return Vec::new();
    };
    let Some(entries) = paths.as_sequence() else {
        tracing::warn!(
            "host {}: paths must be a list, ignoring overrides",
            describe(host)
        );
        return Vec::new();
    };
    entries
        .iter()
        .zip(sync_paths)
        .map(|(entry, sync_path)| scalar_string(entry).unwrap_or_else(|| sync_path.clone()))
        .collect()
}

fn stringify_user(host: &mut Mapping) {
    if let Some(user) = host.string("user") {
        host.set("user", user);
    }
}

/// Human-readable label for log messages.
fn describe(host: &Mapping) -> String {
    host.string("name")
        .or_else(|| host.string("address"))
        .map_or_else(|| "<unnamed>".to_string(), |label| format!("'{label}'"))
}
