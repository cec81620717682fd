//! Fatal format errors.
//!
//! These abort the whole import: a required structural marker or field is
//! missing and no data could be extracted. Per-row problems are warnings
//! instead (see [`crate::base::Warnings`]).

use thiserror::Error;

/// A whole-batch structural failure of an import format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("missing '%T PROJWBS' table marker in tabular import")]
    MissingTableMarker,

    #[error("missing '%F' field definition line after the table marker")]
    MissingFieldLine,

    #[error("required field '{0}' missing from the field definition line")]
    MissingRequiredField(&'static str),

    #[error("no '%R' data records found in tabular import")]
    NoRecords,

    #[error("pasted text too short ({len} chars; at least {min} required)")]
    ContentTooShort { len: usize, min: usize },

    #[error("pasted text has too few lines ({lines}; at least {min} required)")]
    TooFewLines { lines: usize, min: usize },

    #[error("no usable rows found in pasted text")]
    NoUsableRows,

    #[error("equipment table is missing required column '{0}'")]
    MissingEquipmentColumn(&'static str),

    #[error("equipment table contains no data rows")]
    EmptyEquipmentTable,
}
