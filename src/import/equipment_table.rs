//! Normalization of the flat equipment table.
//!
//! The host UI hands over raw rows with a header; column names vary
//! between source spreadsheets, so synonyms are mapped onto the five
//! canonical columns before anything reaches the core.

use crate::base::{Warning, WarningKind, Warnings};
use crate::model::{CommissioningStatus, EquipmentItem};

use super::error::ImportError;

const COL_EQUIPMENT_NUMBER: &str = "equipment_number";
const COL_DESCRIPTION: &str = "description";
const COL_STATUS: &str = "commissioning_status";
const COL_SUBSYSTEM: &str = "subsystem";
const COL_PARENT: &str = "parent_equipment_number";

/// Map a raw header cell onto a canonical column name.
fn canonical_column(header: &str) -> Option<&'static str> {
    let key: String = header
        .trim()
        .trim_end_matches('.')
        .to_ascii_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    match key.as_str() {
        "equipment number" | "equipment no" | "equipment" | "tag" | "tag no" | "tag number" => {
            Some(COL_EQUIPMENT_NUMBER)
        }
        "description" | "equipment description" | "desc" => Some(COL_DESCRIPTION),
        "commissioning status" | "commissioning" | "comm status" | "status" => Some(COL_STATUS),
        "subsystem" | "sub system" | "system" => Some(COL_SUBSYSTEM),
        "parent equipment number" | "parent equipment" | "parent" | "parent tag" => {
            Some(COL_PARENT)
        }
        _ => None,
    }
}

/// Result of normalizing the equipment table.
#[derive(Clone, Debug, Default)]
pub struct EquipmentImport {
    pub items: Vec<EquipmentItem>,
    pub warnings: Vec<Warning>,
}

/// Parse header + data rows into canonical [`EquipmentItem`]s.
///
/// The equipment-number column is required; every other column falls back
/// to an empty value. Rows with a blank equipment number are skipped with
/// a warning, and unknown non-empty statuses are treated as `TBC`.
pub fn parse_equipment_rows(rows: &[Vec<String>]) -> Result<EquipmentImport, ImportError> {
    let Some((header, data)) = rows.split_first() else {
        return Err(ImportError::EmptyEquipmentTable);
    };

    let mut number_col = None;
    let mut description_col = None;
    let mut status_col = None;
    let mut subsystem_col = None;
    let mut parent_col = None;
    for (idx, cell) in header.iter().enumerate() {
        match canonical_column(cell) {
            Some(COL_EQUIPMENT_NUMBER) => number_col.get_or_insert(idx),
            Some(COL_DESCRIPTION) => description_col.get_or_insert(idx),
            Some(COL_STATUS) => status_col.get_or_insert(idx),
            Some(COL_SUBSYSTEM) => subsystem_col.get_or_insert(idx),
            Some(COL_PARENT) => parent_col.get_or_insert(idx),
            _ => continue,
        };
    }
    let number_col = number_col.ok_or(ImportError::MissingEquipmentColumn("equipment_number"))?;
    if data.is_empty() {
        return Err(ImportError::EmptyEquipmentTable);
    }

    let cell = |row: &[String], col: Option<usize>| -> String {
        col.and_then(|i| row.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let mut warnings = Warnings::new();
    let mut items = Vec::with_capacity(data.len());
    for (idx, row) in data.iter().enumerate() {
        let row_no = idx + 2; // 1-based, after the header
        let number = cell(row, Some(number_col));
        if number.is_empty() {
            warnings.add(Warning::new(
                WarningKind::SkippedRow,
                format!("row {row_no} skipped: blank equipment number"),
            ));
            continue;
        }

        let raw_status = cell(row, status_col);
        let status = if raw_status.is_empty() {
            CommissioningStatus::Yes
        } else {
            match raw_status.parse() {
                Ok(status) => status,
                Err(()) => {
                    warnings.add(Warning::new(
                        WarningKind::UnknownStatus,
                        format!(
                            "row {row_no}: unknown commissioning status '{raw_status}' for \
                             '{number}'; treated as TBC"
                        ),
                    ));
                    CommissioningStatus::Tbc
                }
            }
        };

        let parent = cell(row, parent_col);
        items.push(EquipmentItem::new(
            number,
            cell(row, description_col),
            status,
            cell(row, subsystem_col),
            Some(parent.as_str()),
        ));
    }

    Ok(EquipmentImport {
        items,
        warnings: warnings.into_vec(),
    })
}
