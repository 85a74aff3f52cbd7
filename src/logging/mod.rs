//! Logging: console output, the per-command run log, and the host summary.

mod file;
mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{HostEntry, HostStatus, Log};

/// Span wrapping everything done for one host of one sync.
///
/// Events inside it are tagged with `sync` and `host` in the run log, and
/// warnings and errors show them on the console.
#[must_use]
pub fn host_span(sync: &str, host: &str) -> tracing::Span {
    tracing::info_span!("host", sync = %sync, host = %host)
}

/// Create a Logger backed by an isolated per-thread tracing subscriber whose
/// run log is `test.log` in a fresh temporary directory.
///
/// Returns a [`tracing::dispatcher::DefaultGuard`] that must be kept alive
/// for the duration of the test; dropping it restores the previous
/// thread-local dispatcher.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::layer::SubscriberExt as _;
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let run_log = file::start_log(&path, "test").expect("failed to open run log");
    let subscriber = tracing_subscriber::registry().with(subscriber::run_log_layer(run_log));
    let log = Logger::with_log_file(Some(path));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, tmp, guard)
}
