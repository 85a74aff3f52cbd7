//! Configuration-driven rsync orchestrator.
//!
//! Paths are grouped into named *syncs*, each mirrored to one or more remote
//! hosts. A sparse YAML file is resolved into a complete plan and then
//! pushed or pulled one rsync invocation at a time.
//!
//! - **[`config`]**: locate, validate and resolve the YAML configuration
//! - **[`transfer`]**: build and run a single rsync invocation
//! - **[`sync`]**: walk the plan in push or pull order and collect failures
//! - **[`commands`]**: top-level subcommands (`list`, `push`, `pull`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod sync;
pub mod transfer;
