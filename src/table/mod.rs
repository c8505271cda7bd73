//! Keyed lookup tables for model inputs
//!
//! A table maps a composite key (a required item name plus up to three
//! optional dimensions) to a value. Lookups are exact-key only: there is no
//! partial matching, wildcard expansion, or fallback across dimensions. A
//! missing key is a normal outcome reported as `None`, never a panic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Composite key identifying one entry in a lookup table
///
/// The item is required; the three dimensions are optional qualifiers.
/// `None` is the "unspecified" marker and is distinct from every real
/// dimension value, so `("Surrender", None, None, None)` and
/// `("Surrender", Some("A"), None, None)` address different entries.
///
/// Dimension order is fixed across all tables: product, policy type,
/// generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableKey {
    /// Assumption or spec item name
    pub item: String,

    /// Product code (e.g. "A", "B")
    pub product: Option<String>,

    /// Policy type (e.g. "TERM", "WL")
    pub policy_type: Option<String>,

    /// Generation identifier
    pub generation: Option<String>,
}

impl TableKey {
    /// Key with all dimensions unspecified
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            product: None,
            policy_type: None,
            generation: None,
        }
    }

    /// Key with explicit dimension values
    pub fn with_dims(
        item: impl Into<String>,
        product: Option<&str>,
        policy_type: Option<&str>,
        generation: Option<&str>,
    ) -> Self {
        Self {
            item: item.into(),
            product: product.map(str::to_owned),
            policy_type: policy_type.map(str::to_owned),
            generation: generation.map(str::to_owned),
        }
    }
}

/// Value stored under a table key
///
/// Input cells are either numeric (rates, factors, amounts) or text
/// (table names, flags). The loader decides which on parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableValue {
    Number(f64),
    Text(String),
}

impl TableValue {
    /// Numeric payload, if this value is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TableValue::Number(n) => Some(*n),
            TableValue::Text(_) => None,
        }
    }

    /// Text payload, if this value is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TableValue::Number(_) => None,
            TableValue::Text(s) => Some(s.as_str()),
        }
    }
}

impl std::fmt::Display for TableValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableValue::Number(n) => write!(f, "{}", n),
            TableValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Exact-key lookup capability
///
/// Any backing store (in-memory map, database table, parsed spreadsheet
/// range) can provide the lookup contract by implementing `get`. The
/// `lookup` convenience builds the composite key from call-site arguments
/// exactly as supplied and delegates to `get`.
pub trait KeyedLookup {
    /// Value stored under the exact key, or `None` if absent
    fn get(&self, key: &TableKey) -> Option<&TableValue>;

    /// Exact-key lookup from item and optional dimensions
    ///
    /// Omitted dimensions default to unspecified, so `lookup(item, None,
    /// None, None)` and a key built from `TableKey::new(item)` are
    /// equivalent.
    fn lookup(
        &self,
        item: &str,
        product: Option<&str>,
        policy_type: Option<&str>,
        generation: Option<&str>,
    ) -> Option<&TableValue> {
        self.get(&TableKey::with_dims(item, product, policy_type, generation))
    }
}

/// In-memory lookup table
///
/// Read-only for the duration of a lookup session; populated once by the
/// loader and then shared freely across threads (lookups take `&self` and
/// mutate nothing).
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<TableKey, TableValue>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value if the key was present
    pub fn insert(&mut self, key: TableKey, value: TableValue) -> Option<TableValue> {
        self.entries.insert(key, value)
    }

    /// Whether the exact key has an entry
    pub fn contains_key(&self, key: &TableKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries (no defined order)
    pub fn iter(&self) -> impl Iterator<Item = (&TableKey, &TableValue)> {
        self.entries.iter()
    }
}

impl KeyedLookup for LookupTable {
    fn get(&self, key: &TableKey) -> Option<&TableValue> {
        self.entries.get(key)
    }
}

impl FromIterator<(TableKey, TableValue)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (TableKey, TableValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
