//! Core logging types: host outcomes and the [`Log`] trait.

/// Outcome of synchronizing one host of one sync, for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Name of the sync.
    pub sync: String,
    /// Name of the host within the sync.
    pub host: String,
    /// Final status of the host.
    pub status: HostStatus,
    /// Optional detail message (e.g., number of failed paths).
    pub message: Option<String>,
}

/// Status of a host after a push or pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    /// Every path transferred successfully.
    Ok,
    /// Not attempted because an earlier host already satisfied a pull.
    Skipped,
    /// At least one path failed to transfer.
    Failed,
}

impl HostStatus {
    /// Lowercase label used in log records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for HostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) writes through [`tracing`]; tests can
/// substitute a recording implementation.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a command that would have run without `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Record a host outcome for the summary.
    fn record_host(&self, sync: &str, host: &str, status: HostStatus, message: Option<&str>);
}
