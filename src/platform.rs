//! Host-environment queries: current user and home directory.
use std::path::{Path, PathBuf};

/// Environment variables consulted, in order, for the current user name.
const USER_VARS: &[&str] = &["USER", "USERNAME", "LOGNAME"];

/// Environment variables consulted, in order, for the home directory.
const HOME_VARS: &[&str] = &["HOME", "USERPROFILE"];

/// Return the name of the user running the process, if it can be determined.
#[must_use]
pub fn current_user() -> Option<String> {
    first_non_empty(USER_VARS)
}

/// Return the home directory of the user running the process.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    first_non_empty(HOME_VARS).map(PathBuf::from)
}

/// Expand a leading `~` or `~/` against `home`.
///
/// Paths without a leading tilde, `~user` forms, and calls without a home
/// directory are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

fn first_non_empty(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
}
