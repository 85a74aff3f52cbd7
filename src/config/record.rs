//! Field access over open YAML records.
//!
//! Hosts carry arbitrary passthrough fields next to the ones syncme knows
//! about, so validation works on [`Mapping`]s rather than fixed structs.
//! A key mapped to `null` counts as absent everywhere in this module.
use serde_yaml::{Mapping, Value};

/// Render a scalar as a string.
///
/// Strings are returned as-is; numbers and booleans use their YAML form.
/// Other values (null, sequences, mappings, tagged values) yield `None`.
#[must_use]
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Convert a sequence of scalars into strings.
///
/// Returns `None` if `value` is not a sequence or any entry is not a scalar.
#[must_use]
pub fn string_list(value: &Value) -> Option<Vec<String>> {
    value.as_sequence()?.iter().map(scalar_string).collect()
}

/// Read a boolean, accepting the YAML 1.1 spellings.
///
/// Besides real booleans, `yes`/`no`, `on`/`off` and `true`/`false` in
/// lowercase, capitalized or uppercase form are understood, as older YAML
/// loaders resolve them. Anything else yields `None`.
#[must_use]
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => Some(true),
            "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False" | "FALSE" => {
                Some(false)
            }
            _ => None,
        },
        _ => None,
    }
}

/// Record-style accessors for [`Mapping`].
pub trait Record {
    /// Return the value for `key`, treating `null` as absent.
    fn field(&self, key: &str) -> Option<&Value>;

    /// Return `true` if `key` is present with a non-null value.
    fn has(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Return the value for `key` rendered as a string, if it is a scalar.
    fn string(&self, key: &str) -> Option<String> {
        self.field(key).and_then(scalar_string)
    }

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: impl Into<Value>);

    /// Store `value` under `key` only if the key is absent.
    fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        if !self.has(key) {
            self.set(key, value);
        }
    }

    /// Copy every field of `other` that `self` does not define yet.
    ///
    /// Existing fields of `self` are never overwritten.
    fn fill_from(&mut self, other: &Mapping);
}

impl Record for Mapping {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|value| !value.is_null())
    }

    fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.insert(Value::from(key), value.into());
    }

    fn fill_from(&mut self, other: &Mapping) {
        for (key, value) in other {
            if value.is_null() {
                continue;
            }
            let present = self.get(key).is_some_and(|existing| !existing.is_null());
            if !present {
                self.insert(key.clone(), value.clone());
            }
        }
    }
}

/// An empty YAML sequence.
#[must_use]
pub fn empty_list() -> Value {
    Value::Sequence(Vec::new())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).expect("test yaml must parse")
    }

    #[test]
    fn flag_accepts_yaml_1_1_booleans() {
        let m = mapping("a: yes\nb: Off\nc: ON\nd: false\ne: NO\nf: True\n");
        let flags: Vec<Option<bool>> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|k| m.field(k).and_then(flag))
            .collect();
        assert_eq!(
            flags,
            vec![Some(true), Some(false), Some(true), Some(false), Some(false), Some(true)]
        );
    }

    #[test]
    fn flag_rejects_other_values() {
        let m = mapping("a: yEs\nb: 1\nc: y\nd: [true]\n");
        for key in ["a", "b", "c", "d"] {
            assert_eq!(m.field(key).and_then(flag), None, "{key}");
        }
    }

    #[test]
    fn null_field_is_absent() {
        let m = mapping("name: ~\naddress: h.com\n");
        assert!(!m.has("name"));
        assert!(m.has("address"));
        assert!(!m.has("missing"));
    }

    #[test]
    fn string_renders_scalars() {
        let m = mapping("a: text\nb: 42\nc: true\nd: [1]\n");
        assert_eq!(m.string("a").as_deref(), Some("text"));
        assert_eq!(m.string("b").as_deref(), Some("42"));
        assert_eq!(m.string("c").as_deref(), Some("true"));
        assert_eq!(m.string("d"), None);
    }

    #[test]
    fn set_default_keeps_existing_value() {
        let mut m = mapping("user: alice\nname: ~\n");
        m.set_default("user", "bob");
        m.set_default("name", "host");
        assert_eq!(m.string("user").as_deref(), Some("alice"));
        assert_eq!(m.string("name").as_deref(), Some("host"));
    }

    #[test]
    fn fill_from_never_overwrites() {
        let mut host = mapping("name: nas\nuser: alice\nport: ~\n");
        let global = mapping("name: nas\nuser: root\naddress: nas.lan\nport: 2222\n");
        host.fill_from(&global);
        assert_eq!(host.string("user").as_deref(), Some("alice"));
        assert_eq!(host.string("address").as_deref(), Some("nas.lan"));
        assert_eq!(host.string("port").as_deref(), Some("2222"));
    }

    #[test]
    fn string_list_requires_scalars() {
        let ok: Value = serde_yaml::from_str("[/a, 2, true]").unwrap();
        assert_eq!(
            string_list(&ok),
            Some(vec!["/a".to_string(), "2".to_string(), "true".to_string()])
        );
        let nested: Value = serde_yaml::from_str("[/a, [b]]").unwrap();
        assert_eq!(string_list(&nested), None);
        assert_eq!(string_list(&Value::from("single")), None);
    }
}
