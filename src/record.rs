//! Lazy field resolution over raw JSON documents.
//!
//! Scopus responses are deeply nested and loosely typed, with vendor
//! prefixes (`prism:`, `dc:`) and attribute keys (`@refcount`). Rather than
//! deserializing into rigid structs, each model wraps the raw
//! [`serde_json::Value`] and resolves fields on demand through a static
//! [`FieldTable`].

use serde_json::Value;

use crate::error::{Result, ScopusError};

/// Conversion applied to a resolved value before it is returned from
/// [`Record::get`]. A `Null` result is treated as absent.
pub type Transform = fn(&Value) -> Value;

/// Path of raw keys from the document root to a field.
pub type FieldPath = &'static [&'static str];

/// Static field declaration for one model.
///
/// Lookup order in [`Record::get`]: a name in `declared` reads the key of
/// the same name at the document root; otherwise `renamed` maps the name to
/// a key path; anything else is an unknown field.
pub struct FieldTable {
    /// Model name, used in error messages.
    pub model: &'static str,
    /// Top-level raw keys exposed under their own names.
    pub declared: &'static [&'static str],
    /// Friendly name to raw key path.
    pub renamed: &'static [(&'static str, FieldPath)],
    /// Final raw key to conversion function.
    pub transforms: &'static [(&'static str, Transform)],
}

impl FieldTable {
    fn transform_for(&self, key: &str) -> Option<Transform> {
        self.transforms
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, transform)| *transform)
    }
}

/// A raw JSON document paired with the field table of its model.
///
/// Holds the document unparsed; field reads walk into it lazily and only
/// the requested value is cloned or converted.
#[derive(Clone)]
pub struct Record {
    raw: Value,
    table: &'static FieldTable,
}

impl Record {
    pub fn new(raw: Value, table: &'static FieldTable) -> Self {
        Self { raw, table }
    }

    /// Read a field by name.
    ///
    /// Returns `Ok(None)` when the field is declared but the document does
    /// not carry it (missing keys and JSON `null` are equivalent), and
    /// [`ScopusError::UnknownField`] when the name is not in the model's
    /// field table.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        let Some((key, value)) = self.resolve_field(name) else {
            return Err(ScopusError::UnknownField {
                model: self.table.model,
                field: name.to_string(),
            });
        };
        let Some(value) = value else {
            return Ok(None);
        };
        let resolved = match self.table.transform_for(key) {
            Some(transform) => transform(value),
            None => value.clone(),
        };
        Ok((!resolved.is_null()).then_some(resolved))
    }

    /// Names accepted by [`Record::get`], sorted and deduplicated.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.table.declared.to_vec();
        names.extend(self.table.renamed.iter().map(|(name, _)| *name));
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Model name this record resolves against.
    pub fn model(&self) -> &'static str {
        self.table.model
    }

    /// The raw document, untouched.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consume the record and return the raw document.
    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Resolved value for a field, without the transform step. Typed
    /// accessors use this to read wire values directly.
    pub(crate) fn resolved(&self, name: &str) -> Option<&Value> {
        self.resolve_field(name)?.1
    }

    /// Resolved string value for a field, tolerating numeric raw values.
    pub(crate) fn text_field(&self, name: &str) -> Option<String> {
        self.resolved(name).and_then(scalar_string)
    }

    /// Resolved non-negative integer for a field, tolerating the string
    /// counts Scopus emits (`"totalResults": "1862"`).
    pub(crate) fn count_field(&self, name: &str) -> Option<u64> {
        self.resolved(name).and_then(as_count)
    }

    /// Map a field name to its final raw key and present value.
    fn resolve_field(&self, name: &str) -> Option<(&'static str, Option<&Value>)> {
        if let Some(key) = self.table.declared.iter().copied().find(|k| *k == name) {
            return Some((key, present(self.raw.get(key))));
        }
        let (_, path) = self.table.renamed.iter().find(|(n, _)| *n == name)?;
        let key = path.last().copied()?;
        Some((key, resolve_path(&self.raw, path)))
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("model", &self.table.model)
            .field("raw", &self.raw)
            .finish()
    }
}

/// Walk a key path into a document, stopping at the first level that is
/// absent, `null`, or not an object. Never fails; absence is `None`.
pub fn resolve_path<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut node = present(Some(document))?;
    for key in path {
        node = present(node.get(key))?;
    }
    Some(node)
}

/// Treat JSON `null` like an absent value.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// View a value as a sequence. Scopus collapses single-element lists to a
/// bare object, so a non-array value becomes a one-element sequence.
pub(crate) fn coerce_to_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Parse a count that may arrive as a JSON number or a numeric string.
pub(crate) fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String view of a scalar, tolerating the numeric values Scopus sometimes
/// emits where strings are expected.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upper(value: &Value) -> Value {
        match value.as_str() {
            Some(s) => Value::String(s.to_uppercase()),
            None => Value::Null,
        }
    }

    static TEST_TABLE: FieldTable = FieldTable {
        model: "TestModel",
        declared: &["plain", "shouted"],
        renamed: &[
            ("friendly", &["vendor:odd-name"]),
            ("nested", &["outer", "inner", "leaf"]),
        ],
        transforms: &[("shouted", upper)],
    };

    fn record() -> Record {
        Record::new(
            json!({
                "plain": "value",
                "shouted": "quiet",
                "vendor:odd-name": 7,
                "outer": {"inner": {"leaf": "deep"}},
                "nulled": null
            }),
            &TEST_TABLE,
        )
    }

    #[test]
    fn test_get_declared_field() {
        let value = record().get("plain").unwrap();
        assert_eq!(value, Some(json!("value")));
    }

    #[test]
    fn test_get_renamed_field() {
        let value = record().get("friendly").unwrap();
        assert_eq!(value, Some(json!(7)));
    }

    #[test]
    fn test_get_nested_path() {
        let value = record().get("nested").unwrap();
        assert_eq!(value, Some(json!("deep")));
    }

    #[test]
    fn test_transform_applied() {
        let value = record().get("shouted").unwrap();
        assert_eq!(value, Some(json!("QUIET")));
    }

    #[test]
    fn test_missing_declared_field_is_none() {
        let rec = Record::new(json!({}), &TEST_TABLE);
        assert_eq!(rec.get("plain").unwrap(), None);
        assert_eq!(rec.get("nested").unwrap(), None);
    }

    #[test]
    fn test_null_equals_absent() {
        let rec = Record::new(json!({"plain": null}), &TEST_TABLE);
        assert_eq!(rec.get("plain").unwrap(), None);
    }

    #[test]
    fn test_null_transform_result_is_none() {
        // upper() returns Null for non-strings
        let rec = Record::new(json!({"shouted": 3}), &TEST_TABLE);
        assert_eq!(rec.get("shouted").unwrap(), None);
    }

    #[test]
    fn test_unknown_field_error_names_model_and_field() {
        let err = record().get("bogus").unwrap_err();
        match err {
            ScopusError::UnknownField { model, field } => {
                assert_eq!(model, "TestModel");
                assert_eq!(field, "bogus");
            }
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_field_names_sorted_and_complete() {
        let names = record().field_names();
        assert_eq!(names, vec!["friendly", "nested", "plain", "shouted"]);
    }

    #[test]
    fn test_resolve_path_stops_at_non_object() {
        let doc = json!({"a": {"b": "leaf"}});
        assert_eq!(resolve_path(&doc, &["a", "b"]), Some(&json!("leaf")));
        assert_eq!(resolve_path(&doc, &["a", "b", "c"]), None);
        assert_eq!(resolve_path(&doc, &["a", "missing"]), None);
    }

    #[test]
    fn test_resolve_path_treats_null_as_absent() {
        let doc = json!({"a": {"b": null}});
        assert_eq!(resolve_path(&doc, &["a", "b"]), None);
    }

    #[test]
    fn test_resolve_path_empty_path_returns_root() {
        let doc = json!({"a": 1});
        assert_eq!(resolve_path(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_coerce_to_list_wraps_single_object() {
        let single = json!({"k": 1});
        assert_eq!(coerce_to_list(&single), vec![&single]);

        let list = json!([{"k": 1}, {"k": 2}]);
        assert_eq!(coerce_to_list(&list).len(), 2);
    }

    #[test]
    fn test_as_count_accepts_numbers_and_strings() {
        assert_eq!(as_count(&json!(42)), Some(42));
        assert_eq!(as_count(&json!("42")), Some(42));
        assert_eq!(as_count(&json!("0")), Some(0));
        assert_eq!(as_count(&json!("n/a")), None);
        assert_eq!(as_count(&json!([1])), None);
    }
}
