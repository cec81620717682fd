//! # wbsgen
//!
//! Core library for WBS hierarchy parsing, equipment classification, and
//! schedule reconciliation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! export     → 3-column flattening for the scheduling tool
//!   ↓
//! reconcile  → 3-tier placement of new equipment
//!   ↓
//! build      → fresh-project hierarchy assembly
//!   ↓
//! classify   → ordered-rule equipment categorization
//!   ↓
//! import     → tabular / pasted-text / equipment-table parsers
//!   ↓
//! model      → nodes, hierarchies, equipment, categories, subsystems
//!   ↓
//! base       → WbsCode codec, warning collection
//! ```
//!
//! The typical flows through the crate:
//!
//! - **New project**: equipment table → [`import::parse_equipment_rows`] →
//!   [`build::WbsBuilder`] → [`export::ExportAssembler`].
//! - **Existing project**: hierarchy text → [`import::import_tabular`] or
//!   [`import::import_pasted`] → [`reconcile::ReconciliationEngine`] →
//!   [`export::ExportAssembler`] (full or new-rows-only).

/// Foundation types: WbsCode, warning collection
pub mod base;

/// Data model: nodes, hierarchies, equipment, categories, subsystems
pub mod model;

/// Structured-text importers
pub mod import;

/// Ordered-rule equipment categorization
pub mod classify;

/// Fresh-project hierarchy assembly
pub mod build;

/// 3-tier reconciliation of new equipment
pub mod reconcile;

/// 3-column export flattening
pub mod export;

// Re-export the types most callers need
pub use base::{Warning, WarningKind, Warnings, WbsCode};
pub use build::WbsBuilder;
pub use classify::classify;
pub use export::{ExportAssembler, ExportMode, ExportRow};
pub use import::{
    EquipmentImport, ImportBundle, ImportError, import_pasted, import_tabular,
    parse_equipment_rows,
};
pub use model::{
    Category, CommissioningStatus, EquipmentItem, Hierarchy, NodeKind, Subsystem, WbsNode,
};
pub use reconcile::{ReconcileOutcome, ReconciliationEngine};
