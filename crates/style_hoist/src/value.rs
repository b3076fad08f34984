//! Constant style values and their structural fingerprint.
//!
//! A [`StyleValue`] is what the literal sub-parser produces for a fragment:
//! a tree of scalars, arrays and objects with no reference to runtime state.
//! Objects keep their source property order so the emitted table reads like
//! the code it came from, but the [`Fingerprint`] ignores that order.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use rustc_hash::FxHasher;

/// An ordered property mapping, e.g. `{ color: 'red', flex: 1 }`.
pub type StyleObject = IndexMap<String, StyleValue>;

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<StyleValue>),
    Object(StyleObject),
}

impl StyleValue {
    /// Textual form used by the naming engine.
    ///
    /// Lists are represented by their first element; objects and empty lists
    /// have no textual form.
    pub fn name_text(&self) -> Option<String> {
        match self {
            Self::Null => Some("null".to_string()),
            Self::Bool(value) => Some(value.to_string()),
            Self::Number(value) => Some(format_number(*value)),
            Self::String(value) => Some(value.clone()),
            Self::Array(items) => items.first().and_then(Self::name_text),
            Self::Object(_) => None,
        }
    }

    /// Whether this is the string keyword `value`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::String(value) if value == keyword)
    }
}

/// Format a number the way JavaScript prints integral and simple decimal values.
pub fn format_number(value: f64) -> String {
    // `Display` for f64 never uses exponent notation, so the output always
    // re-parses to the same value.
    value.to_string()
}

/// Order-insensitive structural hash of a style object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn of(content: &StyleObject) -> Self {
        let mut hasher = FxHasher::default();
        hash_object(content, &mut hasher);
        Self(hasher.finish())
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

fn hash_value(value: &StyleValue, hasher: &mut FxHasher) {
    match value {
        StyleValue::Null => 0u8.hash(hasher),
        StyleValue::Bool(value) => {
            1u8.hash(hasher);
            value.hash(hasher);
        }
        StyleValue::Number(value) => {
            2u8.hash(hasher);
            let normalized = if *value == 0.0 { 0.0 } else { *value };
            normalized.to_bits().hash(hasher);
        }
        StyleValue::String(value) => {
            3u8.hash(hasher);
            value.hash(hasher);
        }
        StyleValue::Array(items) => {
            4u8.hash(hasher);
            items.len().hash(hasher);
            for item in items {
                hash_value(item, hasher);
            }
        }
        StyleValue::Object(object) => {
            5u8.hash(hasher);
            hash_object(object, hasher);
        }
    }
}

fn hash_object(object: &StyleObject, hasher: &mut FxHasher) {
    let mut entries: Vec<_> = object.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries.len().hash(hasher);
    for (key, value) in entries {
        key.hash(hasher);
        hash_value(value, hasher);
    }
}
