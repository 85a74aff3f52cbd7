//! Structured logger with host outcome collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::file::log_file_path;
use super::subscriber::{DRY_RUN_TARGET, MESSAGE_TARGET, OUTCOME_TARGET, STAGE_TARGET};
use super::types::{HostEntry, HostStatus, Log};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_host` method is **not** included because its signature differs
/// from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with summary collection.
///
/// Messages go through [`tracing`], so they reach both the console and the
/// persistent log file at `$XDG_CACHE_HOME/syncme/<command>.log` set up by
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    hosts: Mutex<Vec<HostEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the run summary; the file itself
    /// is created by [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            hosts: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return a clone of all recorded host entries.
    #[must_use]
    pub fn host_entries(&self) -> Vec<HostEntry> {
        self.hosts.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!(target: MESSAGE_TARGET, "{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!(target: MESSAGE_TARGET, "{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!(target: MESSAGE_TARGET, "{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!(target: MESSAGE_TARGET, "{msg}");
    }

    /// Log a command that would have run without `--dry-run`.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a host outcome for the summary.
    pub fn record_host(&self, sync: &str, host: &str, status: HostStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.hosts.lock() {
            guard.push(HostEntry {
                sync: sync.to_string(),
                host: host.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded host has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed hosts.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.hosts.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|h| h.status == HostStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded host outcomes.
    ///
    /// Each host becomes one structured outcome event, followed by the
    /// totals and the location of the run log.
    pub fn print_summary(&self) {
        let hosts = self.host_entries();
        if hosts.is_empty() {
            self.warn("no hosts matched the selection");
            return;
        }

        self.stage("Summary");

        for entry in &hosts {
            tracing::info!(
                target: OUTCOME_TARGET,
                sync = %entry.sync,
                host = %entry.host,
                status = %entry.status,
                detail = entry.message.as_deref()
            );
        }

        let count = |status: HostStatus| hosts.iter().filter(|h| h.status == status).count();
        self.info(&format!(
            "{} hosts: {} ok, {} skipped, {} failed",
            hosts.len(),
            count(HostStatus::Ok),
            count(HostStatus::Skipped),
            count(HostStatus::Failed),
        ));

        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_host(&self, sync: &str, host: &str, status: HostStatus, message: Option<&str>) {
        self.record_host(sync, host, status, message);
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    #[test]
    fn logger_starts_empty() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.host_entries().is_empty());
        assert!(!log.has_failures());
    }

    #[test]
    fn record_host_with_message() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_host("backup", "nas", HostStatus::Failed, Some("1 of 2 paths failed"));
        let entries = log.host_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sync, "backup");
        assert_eq!(entries[0].host, "nas");
        assert_eq!(entries[0].message.as_deref(), Some("1 of 2 paths failed"));
    }

    #[test]
    fn failure_count_ignores_ok_and_skipped() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_host("a", "h1", HostStatus::Ok, None);
        log.record_host("a", "h2", HostStatus::Skipped, None);
        log.record_host("b", "h1", HostStatus::Failed, None);
        log.record_host("b", "h2", HostStatus::Failed, None);
        assert_eq!(log.failure_count(), 2);
        assert!(log.has_failures());
    }

    #[test]
    fn log_trait_delegates_to_logger() {
        let (log, _tmp, _guard) = isolated_logger();
        let log_ref: &dyn Log = &log;
        log_ref.record_host("via-trait", "h", HostStatus::Ok, None);
        assert_eq!(log.host_entries().len(), 1);
    }

    #[test]
    fn messages_are_written_to_file_with_tags() {
        let (log, tmp, _guard) = isolated_logger();
        let marker = format!("marker-{}", std::process::id());
        log.stage(&format!("stage-{marker}"));
        log.debug(&format!("debug-{marker}"));
        log.warn(&format!("warn-{marker}"));
        log.error(&format!("error-{marker}"));
        log.dry_run(&format!("dry-{marker}"));

        let contents = fs::read_to_string(tmp.path().join("test.log")).unwrap();
        let line = |needle: String| {
            contents
                .lines()
                .find(|l| l.contains(&needle))
                .unwrap_or_else(|| panic!("missing {needle} in:\n{contents}"))
                .to_string()
        };
        assert!(line(format!("stage-{marker}")).contains("syncme::stage:"));
        assert!(line(format!("debug-{marker}")).contains("DEBUG syncme:"));
        assert!(line(format!("warn-{marker}")).contains("WARN syncme:"));
        assert!(line(format!("error-{marker}")).contains("ERROR syncme:"));
        assert!(line(format!("dry-{marker}")).contains("syncme::dry_run:"));
    }

    #[test]
    fn summary_lines_reach_the_log_file() {
        let (log, tmp, _guard) = isolated_logger();
        log.record_host("backup", "nas", HostStatus::Ok, None);
        log.record_host("backup", "cloud", HostStatus::Failed, Some("1 of 1 paths failed"));
        log.print_summary();

        let contents = fs::read_to_string(tmp.path().join("test.log")).unwrap();
        assert!(contents.contains("syncme::outcome: sync=backup host=nas status=ok"));
        assert!(contents.contains(
            "syncme::outcome: sync=backup host=cloud status=failed detail=\"1 of 1 paths failed\""
        ));
        assert!(contents.contains("2 hosts: 1 ok, 0 skipped, 1 failed"));
        assert!(!contents.contains('\x1b'), "run log must be plain text");
    }

    #[test]
    fn host_span_tags_run_log_lines() {
        let (log, tmp, _guard) = isolated_logger();
        {
            let _span = crate::logging::host_span("backup", "nas").entered();
            log.warn("rsync exited with status 23");
        }
        log.info("outside any host");

        let contents = fs::read_to_string(tmp.path().join("test.log")).unwrap();
        let tagged = contents
            .lines()
            .find(|l| l.contains("rsync exited"))
            .expect("warning in run log");
        assert!(tagged.contains("host{sync=backup host=nas}"));
        let untagged = contents
            .lines()
            .find(|l| l.contains("outside any host"))
            .expect("info in run log");
        assert!(!untagged.contains("host{"));
    }
}
