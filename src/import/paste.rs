//! Parser for two-column pasted hierarchy text.
//!
//! Each line carries a WBS code and a name, separated by runs of tabs or
//! two-plus spaces. No parent field exists in this format; parentage is
//! derived from the code itself by dropping its last segment.

use std::sync::LazyLock;

use regex::Regex;

use crate::base::{Warning, Warnings, WbsCode};
use crate::model::WbsNode;
use crate::model::node::kind_from_name;
use rustc_hash::FxHashSet;

use super::ImportBundle;
use super::error::ImportError;

/// Shortest paste that can plausibly hold a code/name pair.
const MIN_CONTENT_LEN: usize = 20;
const MIN_LINES: usize = 2;
/// How far into the paste the project-root row is expected.
const PROJECT_NAME_SCAN_LINES: usize = 10;

static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t+| {2,}").expect("column separator pattern"));

/// Parse pasted two-column text into the canonical import bundle.
pub fn import_pasted(text: &str) -> Result<ImportBundle, ImportError> {
    let len = text.trim().len();
    if len < MIN_CONTENT_LEN {
        return Err(ImportError::ContentTooShort {
            len,
            min: MIN_CONTENT_LEN,
        });
    }
    let line_count = text.lines().filter(|l| !l.trim().is_empty()).count();
    if line_count < MIN_LINES {
        return Err(ImportError::TooFewLines {
            lines: line_count,
            min: MIN_LINES,
        });
    }

    let mut warnings = Warnings::new();
    let mut nodes: Vec<WbsNode> = Vec::new();
    let mut seen: FxHashSet<(WbsCode, String)> = FxHashSet::default();
    let mut project_name: Option<String> = None;
    let mut header_skipped = false;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Column 1 is the code, column 2 the name; stray trailing
        // columns are ignored rather than folded into the name.
        let mut columns = COLUMN_SEPARATOR.split(trimmed);
        let first = columns.next().unwrap_or("").trim();
        let Some(name) = columns.next().map(str::trim) else {
            warnings.add(Warning::malformed_line(line_no, "fewer than 2 columns"));
            continue;
        };

        // The obvious header row is tolerated once and skipped.
        if !header_skipped && first.eq_ignore_ascii_case("WBS Code") {
            header_skipped = true;
            continue;
        }

        let Some(code) = WbsCode::parse(first) else {
            warnings.add(Warning::malformed_line(line_no, "first column is not a WBS code"));
            continue;
        };

        if project_name.is_none() && idx < PROJECT_NAME_SCAN_LINES && code.level() == 1 {
            project_name = Some(name.to_string());
        }

        // Repeated identical rows are a paste artifact, not data.
        if !seen.insert((code.clone(), name.to_string())) {
            continue;
        }

        let kind = kind_from_name(&code, name);
        nodes.push(WbsNode::new(code, name, kind));
    }

    if nodes.is_empty() {
        return Err(ImportError::NoUsableRows);
    }

    let mut bundle = ImportBundle::assemble(nodes, warnings);
    if project_name.is_some() {
        bundle.project_name = project_name;
    }
    Ok(bundle)
}
