//! Model input space: named reference tables and lookup cells
//!
//! An `InputSpace` holds one loaded table per named reference and exposes
//! the two lookup cells used throughout the model: `asmp_lookup` against
//! the `Assumption` table and `spec_lookup` against the `ProductSpec`
//! table. Both take an item name and optional product / policy type /
//! generation dimensions and return the stored value or `None`.

pub mod bindings;
pub mod loader;

pub use bindings::{RangeBinding, ReferenceBindings};

use crate::error::InputError;
use crate::table::{KeyedLookup, LookupTable, TableValue};
use std::collections::HashMap;
use std::path::Path;

/// Policy data reference name
pub const POLICY_DATA: &str = "PolicyData";
/// Mortality tables reference name
pub const MORTALITY_TABLES: &str = "MortalityTables";
/// Assumptions-by-duration reference name
pub const ASSUMPTION_TABLES: &str = "AssumptionTables";
/// Economic scenarios reference name
pub const SCENARIOS: &str = "Scenarios";
/// Large-policy premium discount reference name
pub const DISCOUNT_RATE: &str = "DiscountRate";
/// Premium waiver cost reference name
pub const PREM_WAIVER_COST: &str = "PremWaiverCost";
/// Assumption table reference name
pub const ASSUMPTION: &str = "Assumption";
/// Product spec table reference name
pub const PRODUCT_SPEC: &str = "ProductSpec";

/// Loaded input tables, keyed by reference name
///
/// Built once at startup and read-only afterwards; lookups take `&self`
/// and are safe from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct InputSpace {
    tables: HashMap<String, LookupTable>,
}

impl InputSpace {
    /// Empty space with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every bound reference from CSV sources in `dir`
    ///
    /// Fails if any bound source file is missing or malformed.
    pub fn load<P: AsRef<Path>>(dir: P, refs: &ReferenceBindings) -> Result<Self, InputError> {
        let dir = dir.as_ref();
        let mut tables = HashMap::new();

        for (name, binding) in refs.iter() {
            let path = dir.join(&binding.source);
            if !path.is_file() {
                return Err(InputError::MissingSource {
                    name: name.to_string(),
                    path,
                });
            }
            tables.insert(name.to_string(), loader::load_table(&path)?);
        }

        Ok(Self { tables })
    }

    /// Add or replace a table under a reference name
    pub fn with_table(mut self, name: impl Into<String>, table: LookupTable) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Table bound to a reference name, if loaded
    pub fn table(&self, name: &str) -> Option<&LookupTable> {
        self.tables.get(name)
    }

    /// Loaded reference names (no defined order)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Look up an assumption value
    ///
    /// Exact-key lookup against the `Assumption` table; returns `None` when
    /// the key has no entry (or no `Assumption` table is loaded).
    pub fn asmp_lookup(
        &self,
        asmp: &str,
        product: Option<&str>,
        policy_type: Option<&str>,
        generation: Option<&str>,
    ) -> Option<&TableValue> {
        self.table(ASSUMPTION)?
            .lookup(asmp, product, policy_type, generation)
    }

    /// Look up a product spec value
    ///
    /// Same contract as [`asmp_lookup`](Self::asmp_lookup), addressed at
    /// the `ProductSpec` table.
    pub fn spec_lookup(
        &self,
        spec: &str,
        product: Option<&str>,
        policy_type: Option<&str>,
        generation: Option<&str>,
    ) -> Option<&TableValue> {
        self.table(PRODUCT_SPEC)?
            .lookup(spec, product, policy_type, generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableKey;
    use approx::assert_relative_eq;

    fn space() -> InputSpace {
        let mut asmp = LookupTable::new();
        asmp.insert(
            TableKey::with_dims("MortFactor", Some("A"), Some("TERM"), Some("1")),
            TableValue::Number(0.85),
        );
        asmp.insert(TableKey::new("InflRate"), TableValue::Number(0.01));

        let mut spec = LookupTable::new();
        spec.insert(
            TableKey::with_dims("PolFee", Some("A"), None, None),
            TableValue::Number(50.0),
        );

        InputSpace::new()
            .with_table(ASSUMPTION, asmp)
            .with_table(PRODUCT_SPEC, spec)
    }

    #[test]
    fn test_asmp_lookup() {
        let space = space();

        let factor = space
            .asmp_lookup("MortFactor", Some("A"), Some("TERM"), Some("1"))
            .and_then(TableValue::as_number)
            .unwrap();
        assert_relative_eq!(factor, 0.85);

        // Mismatched generation is absent, not a fallback
        assert!(space.asmp_lookup("MortFactor", Some("A"), Some("TERM"), Some("2")).is_none());

        // Omitted dimensions address the fully-unspecified entry
        let infl = space
            .asmp_lookup("InflRate", None, None, None)
            .and_then(TableValue::as_number)
            .unwrap();
        assert_relative_eq!(infl, 0.01);
    }

    #[test]
    fn test_spec_lookup() {
        let space = space();
        assert_eq!(
            space.spec_lookup("PolFee", Some("A"), None, None),
            Some(&TableValue::Number(50.0))
        );
        assert!(space.spec_lookup("PolFee", Some("B"), None, None).is_none());
    }

    #[test]
    fn test_lookups_address_distinct_tables() {
        let space = space();

        // PolFee lives in ProductSpec only
        assert!(space.asmp_lookup("PolFee", Some("A"), None, None).is_none());
        // MortFactor lives in Assumption only
        assert!(space.spec_lookup("MortFactor", Some("A"), Some("TERM"), Some("1")).is_none());
    }

    #[test]
    fn test_load_standard_inputs() {
        let refs = ReferenceBindings::standard();
        let space = InputSpace::load("data/input", &refs).expect("failed to load input tables");

        // Every bound reference gets a table
        for name in refs.names() {
            let table = space.table(name).unwrap();
            assert!(!table.is_empty(), "table {} is empty", name);
        }

        let factor = space
            .asmp_lookup("MortFactor", Some("A"), Some("TERM"), Some("1"))
            .and_then(TableValue::as_number)
            .unwrap();
        assert_relative_eq!(factor, 0.85);

        let fee = space
            .spec_lookup("PolFee", Some("B"), None, None)
            .and_then(TableValue::as_number)
            .unwrap();
        assert_relative_eq!(fee, 60.0);
    }

    #[test]
    fn test_load_missing_source() {
        let mut refs = ReferenceBindings::new();
        refs.insert("Assumption", RangeBinding::new("no_such_file.csv", "AssumptionTable"));

        let err = InputSpace::load("data/input", &refs).unwrap_err();
        match err {
            InputError::MissingSource { name, .. } => assert_eq!(name, "Assumption"),
            other => panic!("expected MissingSource, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_space() {
        let space = InputSpace::new();
        assert!(space.asmp_lookup("InflRate", None, None, None).is_none());
        assert!(space.table(ASSUMPTION).is_none());
    }
}
