//! Legacy field-name tables.
//!
//! Records written by older clients use drifted key names (`Title`, `ImageID`,
//! `product_blueprint_id`, ...). Each collection carries one versioned table of
//! `legacy -> canonical` names; `canonicalize` rewrites a raw document once,
//! before typed decoding, so the typed records only ever see canonical keys.

use serde_json::{Map, Value};

/// How an aliased table applies to a nested field.
#[derive(Debug, Clone, Copy)]
pub enum Nested {
    /// The field is an array of rows.
    Rows(&'static AliasTable),
    /// The field is an object whose values are rows (e.g. a cart's item map).
    Values(&'static AliasTable),
}

/// Versioned `legacy -> canonical` field mapping for one collection.
#[derive(Debug)]
pub struct AliasTable {
    pub collection: &'static str,
    pub version: u32,
    /// `(legacy, canonical)` pairs. Earlier entries win when several legacy
    /// names map to the same canonical field.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Canonical field names whose contents are canonicalised with another table.
    pub nested: &'static [(&'static str, Nested)],
}

impl AliasTable {
    pub const EMPTY: AliasTable = AliasTable {
        collection: "",
        version: 0,
        aliases: &[],
        nested: &[],
    };

    /// The canonical name for `field`, if it is a known legacy name.
    pub fn canonical_name(&self, field: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(legacy, _)| *legacy == field)
            .map(|(_, canonical)| *canonical)
    }

    /// Rewrite legacy keys to their canonical names.
    ///
    /// A canonical key present on the document always wins over legacy ones.
    /// `null` values are dropped so they read as "absent" downstream.
    /// Non-object documents are returned unchanged.
    pub fn canonicalize(&self, doc: Value) -> Value {
        let Value::Object(mut map) = doc else {
            return doc;
        };
        if self.aliases.is_empty() && self.nested.is_empty() {
            return Value::Object(map);
        }

        let mut out = Map::with_capacity(map.len());
        let keys: Vec<String> = map.keys().cloned().collect();
        for key in keys {
            if self.canonical_name(&key).is_some() {
                continue;
            }
            if let Some(value) = map.remove(&key) {
                if !value.is_null() {
                    out.insert(key, value);
                }
            }
        }

        for (legacy, canonical) in self.aliases {
            if out.contains_key(*canonical) {
                continue;
            }
            if let Some(value) = map.remove(*legacy) {
                if !value.is_null() {
                    out.insert((*canonical).to_string(), value);
                }
            }
        }

        for (field, nested) in self.nested {
            if let Some(value) = out.remove(*field) {
                out.insert((*field).to_string(), nested.apply(value));
            }
        }

        Value::Object(out)
    }
}

impl Nested {
    fn apply(&self, value: Value) -> Value {
        match (self, value) {
            (Nested::Rows(table), Value::Array(rows)) => {
                Value::Array(rows.into_iter().map(|row| table.canonicalize(row)).collect())
            }
            (Nested::Values(table), Value::Object(rows)) => Value::Object(
                rows.into_iter()
                    .map(|(key, row)| (key, table.canonicalize(row)))
                    .collect(),
            ),
            (_, other) => other,
        }
    }
}
