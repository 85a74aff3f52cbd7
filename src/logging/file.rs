//! Run log location and creation.
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::platform;

/// Directory holding one log per command: `$XDG_CACHE_HOME/syncme`, or
/// `~/.cache/syncme` when the variable is unset or empty.
pub(super) fn log_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CACHE_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| platform::home_dir().map(|home| home.join(".cache")))
        .map(|cache| cache.join("syncme"))
}

/// Log file for `command`, e.g. `~/.cache/syncme/push.log`.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    log_dir().map(|dir| dir.join(format!("{command}.log")))
}

/// Truncate the log at `path` and write the run header.
///
/// Missing parent directories are created. Returns `None` if the file cannot
/// be written; the run then continues with console output only.
pub(super) fn start_log(path: &Path, command: &str) -> Option<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let mut file = File::create(path).ok()?;
    let version = option_env!("SYNCME_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    let started = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    writeln!(file, "# syncme {version} {command} started {started}").ok()?;
    Some(file)
}
