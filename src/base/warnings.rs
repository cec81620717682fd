//! Recoverable data warnings.
//!
//! Orphaned nodes, unresolved parent ids, and malformed rows are reported
//! alongside a successful result rather than aborting the import. Only
//! whole-batch structural failures become errors.

use std::fmt;

/// What kind of data problem a warning describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarningKind {
    /// A node references a parent code that is absent or not its direct
    /// dot-prefix parent.
    Orphan,
    /// A record's parent id was present but could not be resolved to a
    /// code; the record was kept as a de facto root.
    UnresolvedParent,
    /// A line did not yield enough columns, or a code failed validation;
    /// the line was skipped.
    MalformedLine,
    /// A duplicate code was dropped (first occurrence kept).
    DuplicateCode,
    /// A data row was skipped (e.g. blank equipment number).
    SkippedRow,
    /// A commissioning status value was not `Y`/`N`/`TBC`.
    UnknownStatus,
}

/// A recoverable data warning with a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn orphan(code: &str, parent: &str) -> Self {
        Self::new(
            WarningKind::Orphan,
            format!("node '{code}' references missing parent '{parent}'"),
        )
    }

    pub fn misparented(code: &str, parent: &str) -> Self {
        Self::new(
            WarningKind::Orphan,
            format!("node '{code}' lists parent '{parent}', which is not its direct dot-prefix parent"),
        )
    }

    pub fn unresolved_parent(id: &str, parent_id: &str) -> Self {
        Self::new(
            WarningKind::UnresolvedParent,
            format!("record '{id}' has unresolvable parent id '{parent_id}'; kept as root"),
        )
    }

    pub fn malformed_line(line_no: usize, reason: &str) -> Self {
        Self::new(
            WarningKind::MalformedLine,
            format!("line {line_no} skipped: {reason}"),
        )
    }

    pub fn duplicate_code(code: &str) -> Self {
        Self::new(
            WarningKind::DuplicateCode,
            format!("duplicate code '{code}' dropped (first occurrence kept)"),
        )
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Collects warnings during an import or reconciliation run.
#[derive(Clone, Debug, Default)]
pub struct Warnings {
    warnings: Vec<Warning>,
}

impl Warnings {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning.
    pub fn add(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Absorb all warnings from another collector.
    pub fn extend(&mut self, other: Warnings) {
        self.warnings.extend(other.warnings);
    }

    /// Get all warnings collected so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Take all warnings, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Consume the collector into its warnings.
    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }

    /// Render all warnings as display strings (the host UI contract).
    pub fn to_strings(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }
}
