//! Structured-text importers.
//!
//! Two hierarchy parsers feed the same canonical [`ImportBundle`]:
//! - [`import_tabular`] - the scheduling tool's table/field/record export
//! - [`import_pasted`] - freeform two-column pasted text
//!
//! plus [`parse_equipment_rows`] for the flat equipment table.

mod bundle;
mod equipment_table;
mod error;
mod paste;
mod tabular;
mod tokenize;

pub use bundle::ImportBundle;
pub use equipment_table::{EquipmentImport, parse_equipment_rows};
pub use error::ImportError;
pub use paste::import_pasted;
pub use tabular::import_tabular;
pub use tokenize::split_record_line;
