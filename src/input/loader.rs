//! CSV-based input table loader
//!
//! Each named reference loads from one CSV source with the columns
//! `Item,Product,PolicyType,Generation,Value`. Empty dimension cells mean
//! "unspecified". Values that parse as numbers are stored numerically;
//! anything else is kept as text.

use crate::error::InputError;
use crate::table::{LookupTable, TableKey, TableValue};
use log::debug;
use std::fs::File;
use std::path::Path;

/// Raw CSV row for one table entry
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Product")]
    product: Option<String>,
    #[serde(rename = "PolicyType")]
    policy_type: Option<String>,
    #[serde(rename = "Generation")]
    generation: Option<String>,
    #[serde(rename = "Value")]
    value: String,
}

impl CsvRow {
    fn into_entry(self) -> (TableKey, TableValue) {
        let key = TableKey {
            item: self.item,
            product: self.product,
            policy_type: self.policy_type,
            generation: self.generation,
        };
        // Numeric cells dominate these tables; fall back to text
        let value = match self.value.parse::<f64>() {
            Ok(n) => TableValue::Number(n),
            Err(_) => TableValue::Text(self.value),
        };
        (key, value)
    }
}

/// Load a lookup table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<LookupTable, InputError> {
    let file = File::open(path.as_ref())?;
    let table = load_table_from_reader(file)?;
    debug!(
        "loaded {} entries from {}",
        table.len(),
        path.as_ref().display()
    );
    Ok(table)
}

/// Load a lookup table from any reader producing CSV
pub fn load_table_from_reader<R: std::io::Read>(reader: R) -> Result<LookupTable, InputError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = LookupTable::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let (key, value) = row.into_entry();

        // Keys are unique within a table; a repeat is bad input, not a
        // silent overwrite
        if table.contains_key(&key) {
            return Err(InputError::DuplicateKey { key });
        }
        table.insert(key, value);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::KeyedLookup;
    use approx::assert_relative_eq;

    const ASMP_CSV: &str = "\
Item,Product,PolicyType,Generation,Value
BaseMort,A,TERM,1,CSO2001
MortFactor,A,TERM,1,0.85
Surrender,A,TERM,,0.02
IntRate,,,,0.015
";

    #[test]
    fn test_load_from_reader() {
        let table = load_table_from_reader(ASMP_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);

        let factor = table
            .lookup("MortFactor", Some("A"), Some("TERM"), Some("1"))
            .and_then(TableValue::as_number)
            .unwrap();
        assert_relative_eq!(factor, 0.85);

        assert_eq!(
            table
                .lookup("BaseMort", Some("A"), Some("TERM"), Some("1"))
                .and_then(TableValue::as_text),
            Some("CSO2001")
        );
    }

    #[test]
    fn test_empty_cells_are_unspecified() {
        let table = load_table_from_reader(ASMP_CSV.as_bytes()).unwrap();

        // Trailing empty Generation cell means the dimension is unset
        assert!(table.lookup("Surrender", Some("A"), Some("TERM"), None).is_some());
        assert!(table.lookup("Surrender", Some("A"), Some("TERM"), Some("")).is_none());

        // Item-only entry lives under fully unspecified dimensions
        let rate = table
            .lookup("IntRate", None, None, None)
            .and_then(TableValue::as_number)
            .unwrap();
        assert_relative_eq!(rate, 0.015);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let csv = "\
Item,Product,PolicyType,Generation,Value
PolFee,A,,,50
PolFee,A,,,60
";
        let err = load_table_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            InputError::DuplicateKey { key } => {
                assert_eq!(key.item, "PolFee");
                assert_eq!(key.product.as_deref(), Some("A"));
            }
            other => panic!("expected DuplicateKey, got {:?}", other),
        }
    }
}
