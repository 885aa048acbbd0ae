//! JSON merge helpers for layered overrides.

use serde_json::{Map, Value};

/// Merge overlay values into the base, recursively overriding objects.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

/// Rewrite dotted top-level keys as nested objects.
///
/// Layers may spell one key as `"navigator.platform"` or as
/// `{"navigator": {"platform": ..}}`; merging and pinning need a single
/// spelling. Within one layer the dotted spelling wins, as it does for
/// lookups. A dotted key replaces any non-object value on its path.
pub(super) fn expand_dotted_keys(value: Value) -> Value {
    let Value::Object(entries) = value else {
        return value;
    };
    let (dotted, plain): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|(key, _)| is_dotted_path(key));
    let mut expanded = Value::Object(plain.into_iter().collect());
    for (key, leaf) in dotted {
        let nested = key.rsplit('.').fold(leaf, |inner, segment| {
            let mut map = Map::new();
            map.insert(segment.to_string(), inner);
            Value::Object(map)
        });
        merge_json_values(&mut expanded, &nested);
    }
    expanded
}

fn is_dotted_path(key: &str) -> bool {
    key.contains('.') && key.split('.').all(|segment| !segment.is_empty())
}

/// Merge overlay values into base, leaving pinned keys untouched.
///
/// A pinned object only protects the sub-keys it names; any other pinned
/// value protects its whole key.
pub(super) fn merge_json_with_pins(base: &mut Value, overlay: &Value, pins: Option<&Value>) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let pin_map = match pins {
                Some(Value::Object(map)) => Some(map),
                Some(_) => return,
                None => None,
            };

            for (key, value) in overlay_map {
                match pin_map.and_then(|map| map.get(key)) {
                    None => match base_map.get_mut(key) {
                        Some(existing) => merge_json_values(existing, value),
                        None => {
                            base_map.insert(key.clone(), value.clone());
                        }
                    },
                    Some(key_pins @ Value::Object(_)) => {
                        let base_entry = base_map
                            .entry(key.clone())
                            .or_insert_with(|| Value::Object(serde_json::Map::new()));
                        merge_json_with_pins(base_entry, value, Some(key_pins));
                    }
                    Some(_) => {
                        // Pinned key; skip overrides.
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            if pins.is_none() {
                *base_slot = overlay_value.clone();
            }
        }
    }
}
