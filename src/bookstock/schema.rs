//! # Schema Descriptor
//!
//! The dataset schema has gone through two generations: the original shape
//! carried only the `lanColumns` declaration, the extended shape added the
//! `hangSach` field and a second declared-column list (`hangDaLenColumns`).
//! Rather than duplicating the store per generation, a single descriptor
//! enumerates the fixed-field wire names and the naming conventions that mark
//! a document key as a dynamic column. Tolerant deserialization (absent
//! fields default, the empty second column list is omitted on output) keeps
//! documents from either generation readable and writable.
//!
//! The descriptor is the single source of truth for three consumers:
//! - [`crate::model::Book`] serialization: which keys are fixed, which
//!   remaining keys belong to the cycle map.
//! - [`crate::model::Dataset::reconcile`]: which stale keys it may delete.
//! - The store bootstrap: which columns a fresh dataset starts with.

/// Describes one dataset schema: fixed fields, dynamic-column naming, and
/// the columns a brand-new dataset is seeded with.
pub struct Schema {
    /// Wire names of the fixed string fields, in display order.
    pub string_fields: &'static [&'static str],
    /// A document key matching any of these prefixes is a dynamic column.
    pub dynamic_prefixes: &'static [&'static str],
    /// Columns declared on a freshly seeded dataset.
    pub default_columns: &'static [&'static str],
}

/// The active schema (extended generation, superset of the original).
pub const SCHEMA: Schema = Schema {
    string_fields: &[
        "tenSach", "hangSach", "giaMoi", "mang", "tanKho", "traLai", "ghiChu",
    ],
    dynamic_prefixes: &["lan", "hangDaLen"],
    default_columns: &["lan1", "lan2"],
};

impl Schema {
    /// Whether `key` is recognized as a dynamic-column name.
    ///
    /// This is a compatibility behavior inherited from the wire format: keys
    /// are classified by prefix, so a malformed dynamic key that misses every
    /// prefix is silently dropped on input. Do not reuse this pattern for new
    /// attribute kinds.
    pub fn owns_key(&self, key: &str) -> bool {
        self.dynamic_prefixes
            .iter()
            .any(|prefix| key.starts_with(prefix))
    }

    /// Whether `key` is the wire name of a fixed field.
    pub fn is_fixed(&self, key: &str) -> bool {
        key == "id" || key == "stt" || self.string_fields.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_both_prefixes() {
        assert!(SCHEMA.owns_key("lan1"));
        assert!(SCHEMA.owns_key("lan12"));
        assert!(SCHEMA.owns_key("hangDaLen3"));
        assert!(!SCHEMA.owns_key("round1"));
        assert!(!SCHEMA.owns_key("hang"));
    }

    #[test]
    fn fixed_fields_never_look_dynamic() {
        for field in SCHEMA.string_fields {
            assert!(!SCHEMA.owns_key(field), "{} misread as dynamic", field);
        }
        assert!(SCHEMA.is_fixed("id"));
        assert!(SCHEMA.is_fixed("stt"));
        assert!(SCHEMA.is_fixed("tenSach"));
        assert!(!SCHEMA.is_fixed("lan1"));
    }
}
