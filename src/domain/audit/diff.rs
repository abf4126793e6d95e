// src/domain/audit/diff.rs
//
// Recursive structural comparison of two product snapshots. Produces a flat
// map of dotted-path -> new value plus a mirror map of the old values, so a
// single audit row can answer "what changed and from what".
use serde_json::{Map, Value};

/// Top-level fields managed by the system. Never reported as changes even
/// when they differ between snapshots. Skipped at the top level only;
/// nested `id` keys (component rows, price entries) participate in deep
/// equality on purpose.
const SYSTEM_FIELDS: [&str; 5] = ["id", "created_at", "updated_at", "published_at", "locale"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    pub changes: Map<String, Value>,
    pub previous: Map<String, Value>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    fn record(&mut self, path: &str, old: &Value, new: &Value) {
        self.changes.insert(path.to_owned(), new.clone());
        self.previous.insert(path.to_owned(), old.clone());
    }
}

/// Compare two snapshots and collect every leaf that differs.
///
/// Guarantees: `changes` and `previous` share an identical key set, each key
/// resolves to values that differ by deep equality, and `diff(x, x)` yields
/// two empty maps.
pub fn diff(old: &Map<String, Value>, new: &Map<String, Value>) -> ChangeSet {
    let mut set = ChangeSet::default();

    for key in key_union(old, new) {
        if SYSTEM_FIELDS.contains(&key.as_str()) {
            continue;
        }
        compare(old.get(&key), new.get(&key), &key, &mut set);
    }

    set
}

fn compare(old: Option<&Value>, new: Option<&Value>, path: &str, out: &mut ChangeSet) {
    // An absent key and an explicit null are equivalent once serialised, so
    // both are folded into Null before comparison.
    let old = old.unwrap_or(&Value::Null);
    let new = new.unwrap_or(&Value::Null);

    match (old, new) {
        (Value::Null, Value::Null) => {}
        // One side missing: always a change, no recursion.
        (Value::Null, _) | (_, Value::Null) => out.record(path, old, new),
        // Arrays are opaque: any difference records the entire new array.
        // Reordering, insertion, and removal all look the same in the trail.
        (Value::Array(old_items), Value::Array(new_items)) => {
            if old_items != new_items {
                out.record(path, old, new);
            }
        }
        (Value::Object(old_map), Value::Object(new_map)) => {
            for key in key_union(old_map, new_map) {
                let old_child = old_map.get(&key);
                let new_child = new_map.get(&key);
                if values_equal(old_child, new_child) {
                    continue;
                }

                let child_path = format!("{path}.{key}");
                match (old_child, new_child) {
                    (Some(Value::Object(_)), Some(Value::Object(_))) => {
                        compare(old_child, new_child, &child_path, out);
                    }
                    _ => out.record(
                        &child_path,
                        old_child.unwrap_or(&Value::Null),
                        new_child.unwrap_or(&Value::Null),
                    ),
                }
            }
        }
        // Remaining cases: scalars, or a variant mismatch. Either way the
        // values are recorded whole without descending further.
        _ => {
            if old != new {
                out.record(path, old, new);
            }
        }
    }
}

fn values_equal(old: Option<&Value>, new: Option<&Value>) -> bool {
    old.unwrap_or(&Value::Null) == new.unwrap_or(&Value::Null)
}

fn key_union(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = old.keys().cloned().collect();
    for key in new.keys() {
        if !old.contains_key(key) {
            keys.push(key.clone());
        }
    }
    keys
}
