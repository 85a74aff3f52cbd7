#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the `list` command.

mod common;

use common::ConfigFixture;
use syncme::cli::ListOpts;
use syncme::commands::list;
use syncme::logging::Logger;

/// Snapshot of the outline printed for the backup fixture.
#[test]
fn list_output() {
    let config = ConfigFixture::backup().load();
    let output = list::render(&config.find_syncs(None));
    insta::assert_snapshot!("list_output", output);
}

#[test]
fn list_filters_by_sync_name() {
    let config = ConfigFixture::backup().load();
    let output = list::render(&config.find_syncs(Some("NOTES")));
    assert!(output.starts_with("notes:\n"));
    assert!(!output.contains("backup:"));
}

#[test]
fn list_run_succeeds_on_valid_config() {
    let fixture = ConfigFixture::backup();
    let log = Logger::with_log_file(None);
    let opts = ListOpts { sync_name: None };
    assert!(list::run(&fixture.global(false), &opts, &log).is_ok());
}

#[test]
fn list_run_fails_without_config() {
    let dir = tempfile::tempdir().unwrap();
    let global = syncme::cli::GlobalOpts {
        config: Some(dir.path().join("missing.yml")),
        dry_run: false,
    };
    let log = Logger::with_log_file(None);
    let err = list::run(&global, &ListOpts { sync_name: None }, &log).unwrap_err();
    assert!(err.to_string().contains("missing.yml"));
}
