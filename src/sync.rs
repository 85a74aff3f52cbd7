//! Push/pull dispatch across syncs, hosts and paths.
//!
//! Transfers run one at a time. A failed path never stops the remaining
//! paths or hosts; failures are collected and returned to the caller.
use std::fmt;

use crate::config::{Config, HostConfig, SyncConfig};
use crate::logging::{HostStatus, Log, host_span};
use crate::transfer::Rsync;

/// Transfer direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Local to remote: every selected host receives a copy.
    Push,
    /// Remote to local: the first host that succeeds completely is enough.
    Pull,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => write!(f, "push"),
            Self::Pull => write!(f, "pull"),
        }
    }
}

/// A local/remote path pair whose transfer failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPair {
    /// Path on this machine.
    pub local: String,
    /// Path on the remote host.
    pub remote: String,
}

/// All failed paths of one host within one sync.
#[derive(Debug, Clone, PartialEq)]
pub struct HostFailure<'a> {
    /// Sync the host belongs to.
    pub sync: &'a SyncConfig,
    /// Host whose transfers failed.
    pub host: &'a HostConfig,
    /// Failed pairs, in path order.
    pub failed: Vec<FailedPair>,
}

/// Transfer every path of `host` in `direction`.
///
/// `sync_paths[i]` is the local side of `host.paths[i]`. A missing remote
/// entry defaults to the local path; an entry without a local side is
/// skipped. Returns the pairs whose transfer exited non-zero or could not be
/// started.
pub fn synchronize_host(
    rsync: &Rsync<'_>,
    direction: Direction,
    host: &HostConfig,
    sync_paths: &[String],
    recursive: bool,
    tags: &[String],
    log: &dyn Log,
) -> Vec<FailedPair> {
    let mut failed = Vec::new();
    let user = host.user.as_deref();

    for i in 0..sync_paths.len().max(host.paths.len()) {
        let Some(local) = sync_paths.get(i) else {
            log.warn(&format!(
                "{}: ignoring remote path without a local counterpart",
                host.name
            ));
            continue;
        };
        let remote = host.paths.get(i).unwrap_or(local);

        let result = match direction {
            Direction::Push => rsync.push(local, remote, &host.address, user, tags, recursive),
            Direction::Pull => rsync.pull(local, remote, &host.address, user, tags, recursive),
        };
        match result {
            Ok(0) => log.debug(&format!("{direction} {local} ↔ {}:{remote} ok", host.name)),
            Ok(code) => {
                log.warn(&format!(
                    "rsync exited with status {code}: {local} ↔ {}:{remote}",
                    host.name
                ));
                failed.push(FailedPair {
                    local: local.clone(),
                    remote: remote.clone(),
                });
            }
            Err(err) => {
                log.error(&err.to_string());
                failed.push(FailedPair {
                    local: local.clone(),
                    remote: remote.clone(),
                });
            }
        }
    }

    failed
}

/// Run `direction` over the selected syncs and hosts.
///
/// `sync_name` and `host_name` select by case-insensitive name; `None` or
/// `all` selects everything. For a pull, hosts are tried in order until one
/// transfers every path; the rest are recorded as skipped. A push always
/// visits every selected host.
///
/// Returns one [`HostFailure`] per host that had failed paths. An empty list
/// means every attempted transfer succeeded.
pub fn synchronize_syncs<'c>(
    rsync: &Rsync<'_>,
    direction: Direction,
    config: &'c Config,
    sync_name: Option<&str>,
    host_name: Option<&str>,
    log: &dyn Log,
) -> Vec<HostFailure<'c>> {
    let mut failures = Vec::new();

    let syncs = config.find_syncs(sync_name);
    if syncs.is_empty() {
        log.warn(&format!("no sync matches '{}'", sync_name.unwrap_or("all")));
    }

    for sync in syncs {
        log.stage(&format!("{direction} {}", sync.name));
        let hosts = sync.find_hosts(host_name);
        if hosts.is_empty() {
            log.warn(&format!("{}: no host selected", sync.name));
            continue;
        }

        let mut satisfied = false;
        for host in hosts {
            if satisfied {
                log.record_host(&sync.name, &host.name, HostStatus::Skipped, Some("already pulled"));
                continue;
            }

            let _span = host_span(&sync.name, &host.name).entered();
            log.info(&format!("{} ({})", host.name, host.address));
            let failed = synchronize_host(
                rsync,
                direction,
                host,
                &sync.paths,
                sync.recursive,
                &sync.tags,
                log,
            );

            if failed.is_empty() {
                log.record_host(&sync.name, &host.name, HostStatus::Ok, None);
                satisfied = direction == Direction::Pull;
            } else {
                let message = format!("{} of {} paths failed", failed.len(), sync.paths.len());
                log.record_host(&sync.name, &host.name, HostStatus::Failed, Some(&message));
                failures.push(HostFailure { sync, host, failed });
            }
        }
    }

    failures
}
