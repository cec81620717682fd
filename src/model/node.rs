//! WBS nodes and the `token | description` naming convention.

use smol_str::SmolStr;

use crate::base::WbsCode;

// ============================================================================
// NODE KIND
// ============================================================================

/// What a node structurally is.
///
/// The kind is assigned once at construction time. String-pattern
/// detection of kinds only happens at the import boundary, where no typed
/// information exists yet (see [`kind_from_name`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// The single project root (pure-integer code).
    Root,
    /// The `M |` milestones container.
    Milestone,
    /// The `P |` prerequisites container.
    Prerequisite,
    /// An `S<n> |` subsystem container.
    Subsystem,
    /// One of the 11 fixed category buckets (`01`..`10`, `99`).
    Category,
    /// An equipment leaf or base-code group parent.
    Equipment,
    /// A sub-device beneath its base equipment.
    SubDevice,
    /// A non-equipment holding node (e.g. the TBC bucket).
    Bucket,
}

// ============================================================================
// WBS NODE
// ============================================================================

/// A single node of a Work Breakdown Structure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WbsNode {
    /// Hierarchical code, unique within a hierarchy.
    pub code: WbsCode,
    /// Code of the direct parent; `None` only for a root.
    pub parent_code: Option<WbsCode>,
    /// Display name, by convention `"<token> | <description>"`.
    pub name: String,
    /// Structural kind, fixed at construction.
    pub kind: NodeKind,
    /// True for nodes created during reconciliation.
    pub is_new: bool,
}

impl WbsNode {
    /// Create a node whose parent is derived from the code itself.
    pub fn new(code: WbsCode, name: impl Into<String>, kind: NodeKind) -> Self {
        let parent_code = code.parent();
        Self {
            code,
            parent_code,
            name: name.into(),
            kind,
            is_new: false,
        }
    }

    /// Create a node with an explicit parent code (tabular imports carry
    /// a parent field that need not be the dot-prefix parent).
    pub fn with_parent(
        code: WbsCode,
        parent_code: Option<WbsCode>,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        Self {
            code,
            parent_code,
            name: name.into(),
            kind,
            is_new: false,
        }
    }

    /// Mark the node as created during reconciliation.
    pub fn flag_new(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Derived level: number of dot-segments of the code.
    pub fn level(&self) -> usize {
        self.code.level()
    }

    /// The `<token>` half of a `"<token> | <description>"` name, if any.
    pub fn name_token(&self) -> Option<&str> {
        split_name(&self.name).map(|(tok, _)| tok)
    }
}

// ============================================================================
// NAME CONVENTION
// ============================================================================

/// Join a token and description per the `"<token> | <description>"`
/// convention.
pub fn display_name(token: &str, description: &str) -> String {
    format!("{token} | {description}")
}

/// Split a node name on its first `|` separator into (token, description),
/// both trimmed. Returns `None` for names without a separator.
pub fn split_name(name: &str) -> Option<(&str, &str)> {
    let (tok, rest) = name.split_once('|')?;
    Some((tok.trim(), rest.trim()))
}

/// Whether a name token is a pure structural marker rather than an
/// equipment code: `M`, `P`, `S<digits>`, or a bare integer.
pub fn is_structural_token(token: &str) -> bool {
    if token == "M" || token == "P" {
        return true;
    }
    if let Some(digits) = token.strip_prefix('S') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return true;
        }
    }
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Infer a node kind from its code level and name.
///
/// Import-boundary only: once a node is constructed its kind is carried
/// explicitly and never re-derived from the name.
pub fn kind_from_name(code: &WbsCode, name: &str) -> NodeKind {
    if code.level() == 1 {
        return NodeKind::Root;
    }
    let Some((token, _)) = split_name(name) else {
        return NodeKind::Bucket;
    };
    if token == "M" {
        return NodeKind::Milestone;
    }
    if token == "P" {
        return NodeKind::Prerequisite;
    }
    if let Some(digits) = token.strip_prefix('S') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return NodeKind::Subsystem;
        }
    }
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return NodeKind::Category;
    }
    if super::equipment::split_base_and_sub_device(token).1.is_some() {
        NodeKind::SubDevice
    } else {
        NodeKind::Equipment
    }
}

/// Equipment number carried by a name, if the name denotes equipment.
pub fn equipment_token(name: &str) -> Option<SmolStr> {
    let (token, _) = split_name(name)?;
    if token.is_empty() || is_structural_token(token) {
        return None;
    }
    Some(SmolStr::new(token))
}
