//! Command-line interface definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for syncme.
#[derive(Parser, Debug)]
#[command(
    name = "syncme",
    about = "Push and pull paths to named hosts with rsync",
    version = option_env!("SYNCME_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options accepted by every subcommand
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Config file to use instead of searching the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print rsync commands without running them
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured syncs
    List(ListOpts),
    /// Copy local paths to remote hosts
    Push(SyncOpts),
    /// Copy remote paths to this machine
    Pull(SyncOpts),
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Push(_) => "push",
            Self::Pull(_) => "pull",
        }
    }
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// Only list the named sync (`all` lists every sync)
    #[arg(short, long)]
    pub sync_name: Option<String>,
}

/// Options for the `push` and `pull` subcommands.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Sync to transfer (`all` selects every sync)
    #[arg(short, long)]
    pub sync_name: Option<String>,

    /// Host to transfer with (`all` selects every host)
    #[arg(short = 'H', long)]
    pub host_name: Option<String>,
}
