//! Commands: push and pull.
use anyhow::Result;

use crate::cli::{GlobalOpts, SyncOpts};
use crate::config::Config;
use crate::logging::Logger;
use crate::sync::{Direction, synchronize_syncs};
use crate::transfer::{DryRunExecutor, Executor, RSYNC_PATH, Rsync, SystemExecutor};

/// Run a push or pull over the selected syncs and hosts.
///
/// With `--dry-run` the rsync command lines are logged instead of executed.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or if any host had
/// a failed transfer. The summary is printed before the latter is returned.
pub fn run(global: &GlobalOpts, opts: &SyncOpts, direction: Direction, log: &Logger) -> Result<()> {
    let config = super::load_config(global, log)?;

    let system = SystemExecutor;
    let dry_run = DryRunExecutor::new(log);
    let executor: &dyn Executor = if global.dry_run { &dry_run } else { &system };
    let rsync = Rsync::new(RSYNC_PATH, executor);

    dispatch(&config, opts, direction, &rsync, log)
}

/// Transfer the selected syncs with `rsync`, then print the summary.
///
/// # Errors
///
/// Returns an error if the logger recorded any failed host.
pub fn dispatch(
    config: &Config,
    opts: &SyncOpts,
    direction: Direction,
    rsync: &Rsync<'_>,
    log: &Logger,
) -> Result<()> {
    let failures = synchronize_syncs(
        rsync,
        direction,
        config,
        opts.sync_name.as_deref(),
        opts.host_name.as_deref(),
        log,
    );

    for failure in &failures {
        for pair in &failure.failed {
            log.error(&format!(
                "{} → {}: {} ↔ {}",
                failure.sync.name, failure.host.name, pair.local, pair.remote
            ));
        }
    }

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("{direction} failed for {} host(s)", log.failure_count());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::{HostStatus, isolated_logger};
    use crate::transfer::MockExecutor;

    const CONFIG: &str = r"
syncs:
  - name: backup
    paths: [/home/me/]
    hosts:
      - {name: nas, address: nas.lan, user: me}
      - {name: cloud, address: cloud.example, user: me}
";

    fn config() -> Config {
        Config::resolve(serde_yaml::from_str(CONFIG).expect("test yaml must parse"))
            .expect("test config must resolve")
    }

    fn everything() -> SyncOpts {
        SyncOpts {
            sync_name: None,
            host_name: None,
        }
    }

    #[test]
    fn push_fails_when_logger_records_a_failed_host() {
        let (log, _tmp, _guard) = isolated_logger();
        let mut mock = MockExecutor::new();
        mock.expect_status().times(2).returning(|_, args| {
            let to_cloud = args.iter().any(|a| a.contains("@cloud.example:"));
            Ok(i32::from(to_cloud) * 23)
        });
        let rsync = Rsync::new(RSYNC_PATH, &mock);

        let err = dispatch(&config(), &everything(), Direction::Push, &rsync, &log)
            .expect_err("a failed host must fail the command");

        assert!(log.has_failures());
        assert_eq!(log.failure_count(), 1);
        assert_eq!(err.to_string(), "push failed for 1 host(s)");
    }

    #[test]
    fn push_succeeds_when_every_host_succeeds() {
        let (log, _tmp, _guard) = isolated_logger();
        let mut mock = MockExecutor::new();
        mock.expect_status().times(2).returning(|_, _| Ok(0));
        let rsync = Rsync::new(RSYNC_PATH, &mock);

        dispatch(&config(), &everything(), Direction::Push, &rsync, &log).unwrap();

        assert!(!log.has_failures());
        assert!(
            log.host_entries()
                .iter()
                .all(|entry| entry.status == HostStatus::Ok)
        );
    }

    #[test]
    fn pull_skipping_remaining_hosts_is_not_a_failure() {
        let (log, _tmp, _guard) = isolated_logger();
        let mut mock = MockExecutor::new();
        mock.expect_status().times(1).returning(|_, _| Ok(0));
        let rsync = Rsync::new(RSYNC_PATH, &mock);

        dispatch(&config(), &everything(), Direction::Pull, &rsync, &log).unwrap();

        assert_eq!(log.failure_count(), 0);
        assert!(
            log.host_entries()
                .iter()
                .any(|entry| entry.status == HostStatus::Skipped)
        );
    }
}
