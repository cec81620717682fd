//! Flattening a hierarchy into the 3-column exchange format.
//!
//! The scheduling tool consumes exactly three columns: `wbs_code`,
//! `parent_wbs_code`, `wbs_name`. Rows are emitted in numeric code order,
//! which for a well-formed hierarchy is its depth-first traversal order.
//! No other transformation happens here.

use crate::base::WbsCode;
use crate::model::{Hierarchy, WbsNode};

/// Which nodes an export covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportMode {
    /// Every node of the hierarchy.
    Full,
    /// Only nodes created by reconciliation (`is_new`), for incremental
    /// loads into an already-populated schedule.
    NewOnly,
}

/// One flattened export row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExportRow {
    pub wbs_code: WbsCode,
    /// Empty column for roots.
    pub parent_wbs_code: Option<WbsCode>,
    pub wbs_name: String,
}

impl ExportRow {
    fn from_node(node: &WbsNode) -> Self {
        Self {
            wbs_code: node.code.clone(),
            parent_wbs_code: node.parent_code.clone(),
            wbs_name: node.name.clone(),
        }
    }
}

const CSV_HEADER: &str = "wbs_code,parent_wbs_code,wbs_name";

/// Flattens hierarchies into export rows and CSV text.
#[derive(Clone, Copy, Debug)]
pub struct ExportAssembler {
    mode: ExportMode,
}

impl ExportAssembler {
    pub fn new(mode: ExportMode) -> Self {
        Self { mode }
    }

    /// Flatten the hierarchy into rows, in numeric code order.
    pub fn rows(&self, hierarchy: &Hierarchy) -> Vec<ExportRow> {
        hierarchy
            .iter()
            .filter(|n| match self.mode {
                ExportMode::Full => true,
                ExportMode::NewOnly => n.is_new,
            })
            .map(ExportRow::from_node)
            .collect()
    }

    /// Render the export as CSV with the fixed 3-column header.
    ///
    /// Fields are quoted per RFC 4180 when they contain a comma, quote,
    /// or line break; embedded quotes are doubled.
    pub fn csv(&self, hierarchy: &Hierarchy) -> String {
        let rows = self.rows(hierarchy);
        let mut out = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 32);
        out.push_str(CSV_HEADER);
        out.push('\n');
        for row in &rows {
            out.push_str(&csv_field(row.wbs_code.as_str()));
            out.push(',');
            if let Some(parent) = &row.parent_wbs_code {
                out.push_str(&csv_field(parent.as_str()));
            }
            out.push(',');
            out.push_str(&csv_field(&row.wbs_name));
            out.push('\n');
        }
        tracing::debug!(rows = rows.len(), mode = ?self.mode, "export rendered");
        out
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
