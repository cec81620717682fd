//! Parser for the scheduling tool's tabular export format.
//!
//! The grammar is a sequence of structured lines:
//!
//! ```text
//! %T  PROJWBS
//! %F  wbs_id  wbs_short_name  wbs_name  parent_wbs_id  ...
//! %R  4000    1.3             S1 | ...  3999           ...
//! ```
//!
//! The table marker and the field line are mandatory; their absence is a
//! fatal [`ImportError`]. Individual bad records are skipped with a
//! warning instead. Parent linkage arrives as a record id, not a code, so
//! an id→code table is built first and each record's parent id resolved
//! through it; an id that resolves to nothing demotes the record to a de
//! facto root with a warning.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::base::{Warning, Warnings, WbsCode};
use crate::model::WbsNode;
use crate::model::node::kind_from_name;

use super::ImportBundle;
use super::error::ImportError;
use super::tokenize::split_record_line;

/// Both marker spellings occur in the wild.
const TABLE_MARKER_TAB: &str = "%T\tPROJWBS";
const TABLE_MARKER_SPACE: &str = "%T PROJWBS";

const FIELD_ID: &str = "wbs_id";
const FIELD_SHORT_NAME: &str = "wbs_short_name";
const FIELD_NAME: &str = "wbs_name";
const FIELD_PARENT_ID: &str = "parent_wbs_id";

const REQUIRED_FIELDS: [&str; 4] = [FIELD_ID, FIELD_SHORT_NAME, FIELD_NAME, FIELD_PARENT_ID];

struct RawRecord {
    id: String,
    code: WbsCode,
    name: String,
    parent_id: String,
}

/// Parse a tabular export into the canonical import bundle.
pub fn import_tabular(text: &str) -> Result<ImportBundle, ImportError> {
    let lines: Vec<&str> = text.lines().collect();

    let marker_idx = lines
        .iter()
        .position(|l| {
            let t = l.trim_end();
            t == TABLE_MARKER_TAB || t == TABLE_MARKER_SPACE
        })
        .ok_or(ImportError::MissingTableMarker)?;

    // The field definition line must immediately follow the marker.
    let field_line = lines
        .get(marker_idx + 1)
        .filter(|l| l.starts_with("%F"))
        .ok_or(ImportError::MissingFieldLine)?;

    let field_index = parse_field_line(field_line)?;

    let mut warnings = Warnings::new();
    let mut records = Vec::new();
    for (offset, line) in lines[marker_idx + 2..].iter().enumerate() {
        let line_no = marker_idx + 3 + offset;
        if line.starts_with("%T") {
            break; // next table
        }
        if !line.starts_with("%R") {
            continue;
        }
        match parse_record(line, &field_index) {
            Ok(record) => records.push(record),
            Err(reason) => warnings.add(Warning::malformed_line(line_no, reason)),
        }
    }

    if records.is_empty() {
        return Err(ImportError::NoRecords);
    }

    // id → short code across all records, for parent resolution.
    let id_to_code: FxHashMap<&str, &WbsCode> = records
        .iter()
        .map(|r| (r.id.as_str(), &r.code))
        .collect();

    let mut nodes = Vec::with_capacity(records.len());
    for record in &records {
        let parent_code = if record.parent_id.is_empty() {
            None
        } else {
            match id_to_code.get(record.parent_id.as_str()) {
                Some(code) => Some((*code).clone()),
                None => {
                    // Permissive by design: keep the record as a root.
                    warnings.add(Warning::unresolved_parent(&record.id, &record.parent_id));
                    None
                }
            }
        };
        let kind = kind_from_name(&record.code, &record.name);
        nodes.push(WbsNode::with_parent(
            record.code.clone(),
            parent_code,
            record.name.clone(),
            kind,
        ));
    }

    Ok(ImportBundle::assemble(nodes, warnings))
}

fn parse_field_line(line: &str) -> Result<IndexMap<String, usize>, ImportError> {
    let mut fields: IndexMap<String, usize> = IndexMap::new();
    // Skip the leading "%F" token; field positions are relative to the
    // record line's own leading "%R".
    for (idx, field) in split_record_line(line).into_iter().enumerate().skip(1) {
        fields.insert(field.trim().to_ascii_lowercase(), idx);
    }
    for required in REQUIRED_FIELDS {
        if !fields.contains_key(required) {
            return Err(ImportError::MissingRequiredField(required));
        }
    }
    Ok(fields)
}

fn parse_record(
    line: &str,
    field_index: &IndexMap<String, usize>,
) -> Result<RawRecord, &'static str> {
    let fields = split_record_line(line);
    let get = |name: &str| -> &str {
        field_index
            .get(name)
            .and_then(|&i| fields.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    };

    let id = get(FIELD_ID);
    if id.is_empty() {
        return Err("blank wbs_id");
    }
    let code = WbsCode::parse(get(FIELD_SHORT_NAME)).ok_or("invalid wbs_short_name code")?;
    let name = get(FIELD_NAME);
    if name.is_empty() {
        return Err("blank wbs_name");
    }

    Ok(RawRecord {
        id: id.to_string(),
        code,
        name: name.to_string(),
        parent_id: get(FIELD_PARENT_ID).to_string(),
    })
}
