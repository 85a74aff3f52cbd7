//! `syncme` binary entry point.
use anyhow::Result;
use clap::Parser;
use std::path::Path;

use syncme::cli::{Cli, Command};
use syncme::sync::Direction;
use syncme::{commands, logging, transfer};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = args.command.name();
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    transfer::ensure_installed(Path::new(transfer::RSYNC_PATH))?;

    match &args.command {
        Command::List(opts) => commands::list::run(&args.global, opts, &log),
        Command::Push(opts) => commands::transfer::run(&args.global, opts, Direction::Push, &log),
        Command::Pull(opts) => commands::transfer::run(&args.global, opts, Direction::Pull, &log),
    }
}
