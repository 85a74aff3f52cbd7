//! rsync invocation.
//!
//! Process spawning sits behind the [`Executor`] trait so that the
//! dispatcher can be tested without running rsync.
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::TransferError;
use crate::logging::Log;

/// Well-known location of the rsync executable.
pub const RSYNC_PATH: &str = "/usr/bin/rsync";

/// Flag appended when a sync is recursive.
const RECURSIVE_FLAG: &str = "-r";

/// Runs an external program to completion.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `program` with `args`, inheriting stdio, and return its exit
    /// status. A process killed by a signal reports `-1`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Spawn`] if the process cannot be started.
    fn status(&self, program: &Path, args: &[String]) -> Result<i32, TransferError>;
}

/// Production [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn status(&self, program: &Path, args: &[String]) -> Result<i32, TransferError> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| TransferError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// [`Executor`] that logs the command line instead of running it.
///
/// Every command "succeeds" with status `0`.
pub struct DryRunExecutor<'a> {
    log: &'a dyn Log,
}

impl<'a> DryRunExecutor<'a> {
    /// Create a dry-run executor reporting to `log`.
    #[must_use]
    pub const fn new(log: &'a dyn Log) -> Self {
        Self { log }
    }
}

impl fmt::Debug for DryRunExecutor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DryRunExecutor").finish_non_exhaustive()
    }
}

impl Executor for DryRunExecutor<'_> {
    fn status(&self, program: &Path, args: &[String]) -> Result<i32, TransferError> {
        self.log.dry_run(&command_line(program, args));
        Ok(0)
    }
}

/// One side of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// A path on this machine.
    Local {
        /// Local path.
        path: &'a str,
    },
    /// A path on a remote host, reached through rsync's remote shell.
    Remote {
        /// Remote user; omitted from the endpoint when `None`.
        user: Option<&'a str>,
        /// Host name or address.
        host: &'a str,
        /// Path on the remote host.
        path: &'a str,
    },
}

impl Endpoint<'_> {
    /// Return `true` for [`Endpoint::Remote`].
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path } => f.write_str(path),
            Self::Remote {
                user: Some(user),
                host,
                path,
            } => write!(f, "{user}@{host}:{path}"),
            Self::Remote {
                user: None,
                host,
                path,
            } => write!(f, "{host}:{path}"),
        }
    }
}

/// Fail unless the transfer tool exists at `path`.
///
/// # Errors
///
/// Returns [`TransferError::ToolMissing`] if `path` is not a regular file.
pub fn ensure_installed(path: &Path) -> Result<(), TransferError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(TransferError::ToolMissing {
            path: path.to_path_buf(),
        })
    }
}

/// Build the rsync argument vector for one transfer.
///
/// Source first, destination second, then `-r` if `recursive`, then every tag
/// verbatim and in order.
///
/// # Errors
///
/// Returns [`TransferError::BothRemote`] if both endpoints are remote.
pub fn build_args(
    source: &Endpoint<'_>,
    dest: &Endpoint<'_>,
    tags: &[String],
    recursive: bool,
) -> Result<Vec<String>, TransferError> {
    if source.is_remote() && dest.is_remote() {
        return Err(TransferError::BothRemote {
            source_endpoint: source.to_string(),
            dest_endpoint: dest.to_string(),
        });
    }

    let mut args = vec![source.to_string(), dest.to_string()];
    if recursive {
        args.push(RECURSIVE_FLAG.to_string());
    }
    args.extend(tags.iter().cloned());
    Ok(args)
}

/// Render a command line for logging.
fn command_line(program: &Path, args: &[String]) -> String {
    std::iter::once(program.display().to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// rsync front end bound to an executable path and an [`Executor`].
pub struct Rsync<'a> {
    program: PathBuf,
    executor: &'a dyn Executor,
}

impl fmt::Debug for Rsync<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rsync")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl<'a> Rsync<'a> {
    /// Create a front end running `program` through `executor`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, executor: &'a dyn Executor) -> Self {
        Self {
            program: program.into(),
            executor,
        }
    }

    /// Run one transfer from `source` to `dest` and return rsync's exit
    /// status unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::BothRemote`] without running anything if both
    /// endpoints are remote, or [`TransferError::Spawn`] if rsync cannot be
    /// started.
    pub fn invoke(
        &self,
        source: &Endpoint<'_>,
        dest: &Endpoint<'_>,
        tags: &[String],
        recursive: bool,
    ) -> Result<i32, TransferError> {
        let args = build_args(source, dest, tags, recursive)?;
        tracing::debug!("{}", command_line(&self.program, &args));
        self.executor.status(&self.program, &args)
    }

    /// Copy `local_path` to `remote_path` on `host`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Spawn`] if rsync cannot be started.
    pub fn push(
        &self,
        local_path: &str,
        remote_path: &str,
        host: &str,
        user: Option<&str>,
        tags: &[String],
        recursive: bool,
    ) -> Result<i32, TransferError> {
        let local = Endpoint::Local { path: local_path };
        let remote = Endpoint::Remote {
            user,
            host,
            path: remote_path,
        };
        self.invoke(&local, &remote, tags, recursive)
    }

    /// Copy `remote_path` on `host` to `local_path`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Spawn`] if rsync cannot be started.
    pub fn pull(
        &self,
        local_path: &str,
        remote_path: &str,
        host: &str,
        user: Option<&str>,
        tags: &[String],
        recursive: bool,
    ) -> Result<i32, TransferError> {
        let local = Endpoint::Local { path: local_path };
        let remote = Endpoint::Remote {
            user,
            host,
            path: remote_path,
        };
        self.invoke(&remote, &local, tags, recursive)
    }
}
