//! # Domain Model: Books with an Extensible Column Set
//!
//! A [`Book`] carries a fixed set of named fields plus `cycles`, an
//! open-ended map of administrator-declared tracking columns ("how many times
//! has this title been through restock cycle N"). The declared column set
//! lives on the [`Dataset`], not on the record, and changes over the life of
//! the data: columns are added and removed in the front end without touching
//! every stored record.
//!
//! ## Wire Shape
//!
//! On the wire every book is a single flat JSON object: the fixed fields
//! under their canonical names, then one entry per cycle column.
//!
//! ```text
//! { "id": 3, "stt": 3, "tenSach": "...", ..., "lan1": "2", "lan2": "" }
//! ```
//!
//! Deserialization is total: absent or mis-typed fixed fields fall back to
//! their zero value, and a leftover key joins `cycles` only when it matches a
//! recognized dynamic prefix (see [`crate::schema`]). Anything else is
//! silently dropped. Documented wire-compat behavior, not a defect.
//!
//! ## Reconciliation
//!
//! Because records are not migrated when the declaration changes, every load
//! and every merge runs [`Dataset::reconcile`] to re-derive a consistent
//! view: each book ends up with exactly the declared columns, missing ones
//! empty, stale prefix-recognized ones removed. The pass is idempotent.

use crate::schema::SCHEMA;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    pub id: i64,
    /// Display ordering hint (wire name `stt`); client-supplied, not unique.
    pub seq: i64,
    pub title: String,
    pub grade: String,
    pub price: String,
    pub channel: String,
    pub stock: String,
    pub returned: String,
    pub notes: String,
    /// Dynamic tracking columns, keyed by declared column name.
    pub cycles: BTreeMap<String, String>,
}

impl Book {
    fn fixed_get(&self, key: &str) -> Option<&str> {
        match key {
            "tenSach" => Some(&self.title),
            "hangSach" => Some(&self.grade),
            "giaMoi" => Some(&self.price),
            "mang" => Some(&self.channel),
            "tanKho" => Some(&self.stock),
            "traLai" => Some(&self.returned),
            "ghiChu" => Some(&self.notes),
            _ => None,
        }
    }

    fn fixed_set(&mut self, key: &str, value: String) {
        match key {
            "tenSach" => self.title = value,
            "hangSach" => self.grade = value,
            "giaMoi" => self.price = value,
            "mang" => self.channel = value,
            "tanKho" => self.stock = value,
            "traLai" => self.returned = value,
            "ghiChu" => self.notes = value,
            _ => {}
        }
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut doc = Map::new();
        doc.insert("id".to_string(), Value::from(self.id));
        doc.insert("stt".to_string(), Value::from(self.seq));
        for &field in SCHEMA.string_fields {
            if let Some(value) = self.fixed_get(field) {
                doc.insert(field.to_string(), Value::from(value));
            }
        }
        // Cycle entries land last: on a name collision the dynamic value wins.
        for (column, value) in &self.cycles {
            doc.insert(column.clone(), Value::from(value.as_str()));
        }
        doc.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Book {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Map<String, Value> = Map::deserialize(deserializer)?;
        let mut book = Book {
            id: int_field(&raw, "id"),
            seq: int_field(&raw, "stt"),
            ..Book::default()
        };
        for &field in SCHEMA.string_fields {
            if let Some(text) = raw.get(field).and_then(Value::as_str) {
                book.fixed_set(field, text.to_string());
            }
        }
        for (key, value) in &raw {
            if SCHEMA.owns_key(key) {
                if let Some(text) = value.as_str() {
                    book.cycles.insert(key.clone(), text.to_string());
                }
            }
        }
        Ok(book)
    }
}

/// Integer coercion for `id`/`stt`: any JSON number counts (floats truncate),
/// everything else (absent, string, null) falls back to zero.
fn int_field(raw: &Map<String, Value>, key: &str) -> i64 {
    raw.get(key)
        .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
        .unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(rename = "lanColumns", default)]
    pub cycle_columns: Vec<String>,
    /// Second declared-column list of the extended schema. Omitted from
    /// output when empty so legacy documents keep their original shape.
    #[serde(
        rename = "hangDaLenColumns",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub listed_columns: Vec<String>,
    /// Stamped by the store on every save; whatever the client sends here is
    /// overwritten.
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: String,
}

impl Dataset {
    /// The dataset a brand-new installation starts with: one blank row and
    /// the default cycle columns.
    pub fn seed() -> Self {
        let mut first = Book {
            id: 1,
            seq: 1,
            ..Book::default()
        };
        for &column in SCHEMA.default_columns {
            first.cycles.insert(column.to_string(), String::new());
        }
        Dataset {
            books: vec![first],
            cycle_columns: SCHEMA
                .default_columns
                .iter()
                .map(|c| c.to_string())
                .collect(),
            ..Dataset::default()
        }
    }

    /// Merge base used when the current dataset cannot be loaded: no rows,
    /// default columns.
    pub fn fallback() -> Self {
        Dataset {
            cycle_columns: SCHEMA
                .default_columns
                .iter()
                .map(|c| c.to_string())
                .collect(),
            ..Dataset::default()
        }
    }

    /// Highest record id currently present, 0 when there are no records.
    pub fn max_id(&self) -> i64 {
        self.books.iter().map(|b| b.id).max().unwrap_or(0)
    }

    /// Align every book's cycle keys with the declared columns.
    ///
    /// Runs on every load and after every merge, so it must be safe to run
    /// redundantly:
    /// 1. declared lists are sanitized (duplicates and fixed-field name
    ///    collisions dropped, first occurrence kept),
    /// 2. declared columns missing from a book are inserted empty,
    /// 3. undeclared keys are deleted only when prefix-recognized; a key this
    ///    reconciler does not own is left alone.
    pub fn reconcile(&mut self) {
        sanitize_columns(&mut self.cycle_columns);
        sanitize_columns(&mut self.listed_columns);

        let declared: Vec<String> = self
            .cycle_columns
            .iter()
            .chain(self.listed_columns.iter())
            .cloned()
            .collect();

        for book in &mut self.books {
            for column in &declared {
                book.cycles.entry(column.clone()).or_default();
            }
            book.cycles
                .retain(|key, _| declared.contains(key) || !SCHEMA.owns_key(key));
        }
    }
}

/// Drop duplicate declared names (first occurrence wins) and names that
/// collide with a fixed field, which would otherwise shadow it on the wire.
fn sanitize_columns(columns: &mut Vec<String>) {
    let mut seen = HashSet::new();
    columns.retain(|name| !SCHEMA.is_fixed(name) && seen.insert(name.clone()));
}
