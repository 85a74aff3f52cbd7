//! Structural validation and default expansion of the raw config tree.
//!
//! Validation mutates the decoded [`Mapping`] in place: defaults are filled
//! in, names lowercased, and host paths rewritten. Authoring mistakes are
//! reported as `false` with the cause logged; a host whose address cannot be
//! resolved is a hard [`HostError`].
use serde_yaml::{Mapping, Value};

use super::hosts::{validate_global_host, validate_host};
use super::record::{Record, empty_list, flag, string_list};
use super::select::WILDCARD;
use crate::error::HostError;

/// Validate one sync and fill in its defaults.
///
/// `recursive` and `tags` default to the root values passed in. Fails if the
/// sync has no name, if its name is the reserved wildcard `all`, or if
/// `recursive`, `paths` or `tags` have the wrong shape. On success the name
/// is lowercased and `hosts`/`paths` default to empty lists.
pub fn validate_sync(sync: &mut Mapping, default_recursive: bool, default_tags: &[String]) -> bool {
    sync.set_default("recursive", default_recursive);
    sync.set_default("tags", default_tags.to_vec());

    let Some(name) = sync.string("name").map(|name| name.to_lowercase()) else {
        tracing::error!("each sync must have a name");
        return false;
    };
    if name.is_empty() {
        tracing::error!("sync name must not be empty");
        return false;
    }
    if name == WILDCARD {
        tracing::error!("sync name '{WILDCARD}' is reserved");
        return false;
    }
    let Some(recursive) = sync.field("recursive").and_then(flag) else {
        tracing::error!("sync '{name}': recursive must be true or false");
        return false;
    };
    sync.set("recursive", recursive);
    for key in ["paths", "tags"] {
        if let Some(value) = sync.field(key) {
            let Some(list) = string_list(value) else {
                tracing::error!("sync '{name}': {key} must be a list of strings");
                return false;
            };
            sync.set(key, list);
        }
    }

    sync.set("name", name);
    sync.set_default("hosts", empty_list());
    sync.set_default("paths", empty_list());
    true
}

/// Validate the whole configuration tree.
///
/// Root defaults are applied first, then every global host, then every sync.
/// A sync's hosts are resolved *before* the sync itself is validated, so they
/// see the sync's paths exactly as written: a sync without `paths` yields
/// hosts with no resolved paths.
///
/// Returns `Ok(false)` on the first structural failure.
///
/// # Errors
///
/// Returns [`HostError`] as soon as a sync host cannot be resolved; the rest
/// of the tree is left unvalidated.
pub fn validate_config(config: &mut Mapping) -> Result<bool, HostError> {
    config.set_default("hosts", empty_list());
    config.set_default("syncs", empty_list());
    config.set_default("recursive", false);
    config.set_default("tags", empty_list());

    let Some(default_recursive) = config.field("recursive").and_then(flag) else {
        tracing::error!("recursive must be true or false");
        return Ok(false);
    };
    config.set("recursive", default_recursive);
    let Some(default_tags) = config.field("tags").and_then(string_list) else {
        tracing::error!("tags must be a list of strings");
        return Ok(false);
    };

    let Some(global_hosts) = config.get_mut("hosts").and_then(Value::as_sequence_mut) else {
        tracing::error!("hosts must be a list");
        return Ok(false);
    };
    for host in global_hosts.iter_mut() {
        let Some(host) = host.as_mapping_mut() else {
            tracing::error!("each global host must be a mapping");
            return Ok(false);
        };
        if !validate_global_host(host) {
            return Ok(false);
        }
    }
    let global_hosts = global_hosts.clone();

    let Some(syncs) = config.get_mut("syncs").and_then(Value::as_sequence_mut) else {
        tracing::error!("syncs must be a list");
        return Ok(false);
    };
    for sync in syncs.iter_mut() {
        let Some(sync) = sync.as_mapping_mut() else {
            tracing::error!("each sync must be a mapping");
            return Ok(false);
        };
        if !validate_sync_hosts(sync, &global_hosts)? {
            return Ok(false);
        }
        if !validate_sync(sync, default_recursive, &default_tags) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Resolve every host of one sync against the sync's paths as written.
fn validate_sync_hosts(sync: &mut Mapping, global_hosts: &[Value]) -> Result<bool, HostError> {
    sync.set_default("hosts", empty_list());
    let label = sync.string("name").unwrap_or_else(|| "<unnamed>".to_string());
    let sync_paths = sync.field("paths").and_then(string_list).unwrap_or_default();

    let Some(hosts) = sync.get_mut("hosts").and_then(Value::as_sequence_mut) else {
        tracing::error!("sync '{label}': hosts must be a list");
        return Ok(false);
    };
    for host in hosts.iter_mut() {
        let Some(host) = host.as_mapping_mut() else {
            tracing::error!("sync '{label}': each host must be a mapping");
            return Ok(false);
        };
        validate_host(host, &sync_paths, global_hosts)?;
    }
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).expect("test yaml must parse")
    }

    fn strings(value: Option<&Value>) -> Vec<String> {
        serde_yaml::from_value(value.cloned().expect("field present")).expect("string list")
    }

    fn first_sync(config: &Mapping) -> &Mapping {
        config["syncs"][0].as_mapping().expect("sync mapping")
    }

    // -----------------------------------------------------------------------
    // validate_sync
    // -----------------------------------------------------------------------

    #[test]
    fn sync_named_all_is_rejected() {
        assert!(!validate_sync(&mut mapping("name: all\n"), false, &[]));
        assert!(!validate_sync(&mut mapping("name: ALL\n"), false, &[]));
    }

    #[test]
    fn sync_without_name_is_rejected() {
        assert!(!validate_sync(&mut Mapping::new(), false, &[]));
        assert!(!validate_sync(&mut mapping("name: ''\n"), false, &[]));
    }

    #[test]
    fn sync_is_normalized_with_defaults() {
        let mut sync = mapping("name: Test\n");
        assert!(validate_sync(&mut sync, true, &["-a".to_string()]));
        assert_eq!(
            sync,
            mapping("name: test\nrecursive: true\ntags: [-a]\nhosts: []\npaths: []\n")
        );
    }

    #[test]
    fn sync_explicit_values_win_over_defaults() {
        let mut sync = mapping("name: docs\nrecursive: false\ntags: [--delete]\n");
        assert!(validate_sync(&mut sync, true, &["-a".to_string()]));
        assert_eq!(sync.field("recursive"), Some(&Value::Bool(false)));
        assert_eq!(strings(sync.field("tags")), vec!["--delete"]);
    }

    #[test]
    fn sync_with_malformed_fields_is_rejected() {
        assert!(!validate_sync(&mut mapping("name: a\npaths: /single\n"), false, &[]));
        assert!(!validate_sync(&mut mapping("name: a\ntags: [[x]]\n"), false, &[]));
        assert!(!validate_sync(&mut mapping("name: a\nrecursive: yes please\n"), false, &[]));
    }

    #[test]
    fn sync_recursive_accepts_yaml_1_1_spelling() {
        let mut sync = mapping("name: a\nrecursive: on\n");
        assert!(validate_sync(&mut sync, false, &[]));
        assert_eq!(sync.field("recursive"), Some(&Value::Bool(true)));
    }

    // -----------------------------------------------------------------------
    // validate_config
    // -----------------------------------------------------------------------

    #[test]
    fn empty_config_gets_root_defaults() {
        let mut config = Mapping::new();
        assert!(validate_config(&mut config).unwrap());
        assert_eq!(
            config,
            mapping("hosts: []\nsyncs: []\nrecursive: false\ntags: []\n")
        );
    }

    #[test]
    fn host_inherits_from_global_host() {
        let mut config = mapping(
            r"
hosts:
  - name: Backup
    address: backup.example.com
    user: archivist
syncs:
  - name: backup
    paths: [/home/me/, /etc]
    hosts:
      - name: backup
",
        );
        assert!(validate_config(&mut config).unwrap());

        let host = config["syncs"][0]["hosts"][0].as_mapping().unwrap();
        assert_eq!(host.string("address").as_deref(), Some("backup.example.com"));
        assert_eq!(host.string("user").as_deref(), Some("archivist"));
        assert_eq!(strings(host.field("paths")), vec!["/home/me/", "/etc"]);
    }

    #[test]
    fn sync_defaults_come_from_root() {
        let mut config = mapping("recursive: true\ntags: [-z]\nsyncs:\n  - name: Notes\n");
        assert!(validate_config(&mut config).unwrap());
        let sync = first_sync(&config);
        assert_eq!(sync.string("name").as_deref(), Some("notes"));
        assert_eq!(sync.field("recursive"), Some(&Value::Bool(true)));
        assert_eq!(strings(sync.field("tags")), vec!["-z"]);
    }

    #[test]
    fn yaml_1_1_booleans_are_normalized() {
        let mut config = mapping("recursive: yes\nsyncs: [{name: a, recursive: off}, {name: b}]\n");
        assert!(validate_config(&mut config).unwrap());
        assert_eq!(config.field("recursive"), Some(&Value::Bool(true)));
        let syncs = config["syncs"].as_sequence().unwrap();
        assert_eq!(syncs[0]["recursive"], Value::Bool(false));
        assert_eq!(syncs[1]["recursive"], Value::Bool(true));
    }

    #[test]
    fn hosts_of_sync_without_paths_resolve_to_no_paths() {
        let mut config = mapping("syncs:\n  - name: bare\n    hosts:\n      - address: h.lan\n");
        assert!(validate_config(&mut config).unwrap());
        let host = first_sync(&config)["hosts"][0].as_mapping().unwrap();
        assert!(strings(host.field("paths")).is_empty());
    }

    #[test]
    fn invalid_global_host_fails_validation() {
        let mut config = mapping("hosts:\n  - name: x\n    address: x.lan\n    paths: [/p]\n");
        assert!(!validate_config(&mut config).unwrap());
    }

    #[test]
    fn invalid_sync_fails_validation() {
        let mut config = mapping("syncs:\n  - paths: [/p]\n");
        assert!(!validate_config(&mut config).unwrap());
    }

    #[test]
    fn unresolvable_host_raises_instead_of_returning_false() {
        let mut config = mapping("syncs:\n  - name: s\n    hosts:\n      - name: ghost\n");
        let err = validate_config(&mut config).unwrap_err();
        assert!(matches!(err, HostError::UnresolvedAddress { ref host } if host == "ghost"));
    }

    #[test]
    fn host_error_takes_precedence_over_missing_sync_name() {
        let mut config = mapping("syncs:\n  - hosts:\n      - user: me\n");
        assert!(validate_config(&mut config).is_err());
    }

    #[test]
    fn non_list_sections_fail_validation() {
        assert!(!validate_config(&mut mapping("hosts: nope\n")).unwrap());
        assert!(!validate_config(&mut mapping("syncs: {a: 1}\n")).unwrap());
        assert!(!validate_config(&mut mapping("syncs: [plain]\n")).unwrap());
        assert!(!validate_config(&mut mapping("tags: -a\n")).unwrap());
    }
}
