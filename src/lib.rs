//! Model Inputs - Input bindings and keyed table lookup for actuarial cash-flow models
//!
//! This library provides:
//! - Composite-key lookup tables (item plus optional product / policy type /
//!   generation dimensions) with exact-match, value-or-absent semantics
//! - Named reference bindings mapping symbolic names to their data sources
//! - A CSV loader building one table per bound reference
//! - An input space exposing the `AsmpLookup` / `SpecLookup` cells the
//!   model evaluates against

pub mod error;
pub mod input;
pub mod table;

// Re-export commonly used types
pub use error::InputError;
pub use input::{InputSpace, RangeBinding, ReferenceBindings};
pub use table::{KeyedLookup, LookupTable, TableKey, TableValue};
