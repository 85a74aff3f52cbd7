// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed config file so each integration test
// can load a real YAML file without touching the user's own configuration.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use syncme::cli::GlobalOpts;
use syncme::config::Config;

/// A backup sync with two paths, mirrored to a global host and to a host
/// with its own address and path overrides.
pub const BACKUP_CONFIG: &str = r"
recursive: true
tags: [-a]
hosts:
  - name: Example
    address: example.com
    user: ghobadimhd
syncs:
  - name: Backup
    paths: [/home/ghobadimhd/, /etc/hosts]
    tags: [-a, --delete]
    hosts:
      - name: example
        paths: [/var/backup/me]
      - name: nas
        address: 10.0.0.5
        user: root
        paths: [~, /srv/hosts]
  - name: notes
    paths: [/home/ghobadimhd/notes/]
    hosts:
      - name: example
";

/// A config file written into a fresh temporary directory.
///
/// The directory is automatically deleted when dropped.
pub struct ConfigFixture {
    /// Temporary directory holding the config file.
    pub dir: tempfile::TempDir,
    /// Path of the config file.
    pub path: PathBuf,
}

impl ConfigFixture {
    /// Write `content` to `syncme.yml` in a new temporary directory.
    pub fn new(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("syncme.yml");
        std::fs::write(&path, content).expect("write config file");
        Self { dir, path }
    }

    /// Fixture containing [`BACKUP_CONFIG`].
    pub fn backup() -> Self {
        Self::new(BACKUP_CONFIG)
    }

    /// Path of the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Global CLI options pointing at this config file.
    pub fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.path.clone()),
            dry_run,
        }
    }

    /// Load and resolve the config file.
    pub fn load(&self) -> Config {
        let (config, path) = Config::load(Some(self.path())).expect("load config");
        assert_eq!(path, self.path);
        config
    }
}
