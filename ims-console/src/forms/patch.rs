//! Partial-update payloads
//!
//! Edits send only the fields that differ from the snapshot the modal was
//! opened with.

use serde::Serialize;
use serde_json::{Map, Value};

/// JSON object holding only the changed fields
pub type Patch = Map<String, Value>;

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}

/// Fields of `edited` whose value differs from `original`.
///
/// A field cleared in the form is kept in the patch with its cleared value
/// (`null` or `""`). A field missing from `edited` but present in `original`
/// is sent as `null`.
pub fn build_patch<T: Serialize>(original: &T, edited: &T) -> Result<Patch, serde_json::Error> {
    let before = to_object(original)?;
    let after = to_object(edited)?;

    let mut patch = Patch::new();
    for (key, value) in &after {
        if before.get(key) != Some(value) {
            patch.insert(key.clone(), value.clone());
        }
    }
    for key in before.keys() {
        if !after.contains_key(key) {
            patch.insert(key.clone(), Value::Null);
        }
    }
    Ok(patch)
}
