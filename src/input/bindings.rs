//! Named reference bindings
//!
//! Each symbolic reference used by the model (PolicyData, Assumption,
//! ProductSpec, ...) is bound to a loader descriptor: the source file
//! holding the data and the named range the file represents. Bindings are
//! an explicit configuration value built at startup and passed to the
//! loader, not ambient module state.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loader descriptor for one named reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBinding {
    /// Source file, relative to the input directory
    pub source: String,

    /// Named range the source represents
    pub range: String,
}

impl RangeBinding {
    pub fn new(source: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            range: range.into(),
        }
    }
}

/// Mapping from symbolic reference names to range bindings
///
/// Serialized as a plain JSON object so deployments can override the
/// standard mapping with a `references.json` next to the input files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceBindings {
    bindings: BTreeMap<String, RangeBinding>,
}

impl ReferenceBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard reference table
    ///
    /// Reference names and the named ranges they bind to:
    ///
    /// | Reference        | Named range      |
    /// |------------------|------------------|
    /// | PolicyData       | PolicyData       |
    /// | MortalityTables  | MortalityTables  |
    /// | AssumptionTables | AsmpByDuration   |
    /// | Scenarios        | Scenarios        |
    /// | DiscountRate     | LargePolDiscount |
    /// | PremWaiverCost   | PremWaiverCost   |
    /// | Assumption       | AssumptionTable  |
    /// | ProductSpec      | ProductSpecTable |
    pub fn standard() -> Self {
        let mut refs = Self::new();
        refs.insert(super::POLICY_DATA, RangeBinding::new("policy_data.csv", "PolicyData"));
        refs.insert(
            super::MORTALITY_TABLES,
            RangeBinding::new("mortality_tables.csv", "MortalityTables"),
        );
        refs.insert(
            super::ASSUMPTION_TABLES,
            RangeBinding::new("asmp_by_duration.csv", "AsmpByDuration"),
        );
        refs.insert(super::SCENARIOS, RangeBinding::new("scenarios.csv", "Scenarios"));
        refs.insert(
            super::DISCOUNT_RATE,
            RangeBinding::new("large_pol_discount.csv", "LargePolDiscount"),
        );
        refs.insert(
            super::PREM_WAIVER_COST,
            RangeBinding::new("prem_waiver_cost.csv", "PremWaiverCost"),
        );
        refs.insert(
            super::ASSUMPTION,
            RangeBinding::new("assumption_table.csv", "AssumptionTable"),
        );
        refs.insert(
            super::PRODUCT_SPEC,
            RangeBinding::new("product_spec_table.csv", "ProductSpecTable"),
        );
        refs
    }

    /// Load bindings from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        Self::from_json_reader(File::open(path)?)
    }

    /// Load bindings from any reader producing JSON
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, InputError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Bind or rebind a reference
    pub fn insert(&mut self, name: impl Into<String>, binding: RangeBinding) -> Option<RangeBinding> {
        self.bindings.insert(name.into(), binding)
    }

    /// Binding for a reference name
    pub fn get(&self, name: &str) -> Option<&RangeBinding> {
        self.bindings.get(name)
    }

    /// Bound reference names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RangeBinding)> {
        self.bindings.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ASSUMPTION, ASSUMPTION_TABLES, DISCOUNT_RATE, PRODUCT_SPEC};

    #[test]
    fn test_standard_bindings() {
        let refs = ReferenceBindings::standard();
        assert_eq!(refs.len(), 8);

        // Names that differ from their range
        assert_eq!(refs.get(ASSUMPTION_TABLES).unwrap().range, "AsmpByDuration");
        assert_eq!(refs.get(DISCOUNT_RATE).unwrap().range, "LargePolDiscount");
        assert_eq!(refs.get(ASSUMPTION).unwrap().range, "AssumptionTable");
        assert_eq!(refs.get(PRODUCT_SPEC).unwrap().range, "ProductSpecTable");

        assert_eq!(refs.get("Scenarios").unwrap().range, "Scenarios");
        assert!(refs.get("NoSuchReference").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let refs = ReferenceBindings::standard();
        let json = serde_json::to_string(&refs).unwrap();
        let back = ReferenceBindings::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(refs, back);
    }

    #[test]
    fn test_json_override() {
        let json = r#"{
            "Assumption": { "source": "asmp_2026.csv", "range": "AssumptionTable" }
        }"#;
        let refs = ReferenceBindings::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.get(ASSUMPTION).unwrap().source, "asmp_2026.csv");
    }
}
