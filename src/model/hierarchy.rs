//! The hierarchy container: sorted nodes plus a code index.

use rustc_hash::FxHashMap;

use crate::base::{WbsCode, Warning, Warnings, next_child_code};

use super::node::WbsNode;

/// A validated, code-sorted WBS hierarchy.
///
/// Nodes are stored sorted by [`WbsCode`] order, which is also the
/// depth-first traversal order of the tree. Codes are unique; duplicates
/// are dropped at construction (first occurrence kept).
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    nodes: Vec<WbsNode>,
    by_code: FxHashMap<WbsCode, usize>,
}

impl Hierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hierarchy from raw nodes: dedup by code (first wins),
    /// sort, and index. Duplicates are reported into `warnings`.
    pub fn from_nodes(nodes: Vec<WbsNode>, warnings: &mut Warnings) -> Self {
        let mut seen: FxHashMap<WbsCode, ()> = FxHashMap::default();
        let mut unique = Vec::with_capacity(nodes.len());
        for node in nodes {
            if seen.insert(node.code.clone(), ()).is_some() {
                warnings.add(Warning::duplicate_code(node.code.as_str()));
                continue;
            }
            unique.push(node);
        }
        unique.sort_by(|a, b| a.code.cmp(&b.code));

        let by_code = unique
            .iter()
            .enumerate()
            .map(|(i, n)| (n.code.clone(), i))
            .collect();
        Self {
            nodes: unique,
            by_code,
        }
    }

    /// Look up a node by code.
    pub fn get(&self, code: &WbsCode) -> Option<&WbsNode> {
        self.by_code.get(code).map(|&i| &self.nodes[i])
    }

    /// Whether a code exists in the hierarchy.
    pub fn contains(&self, code: &WbsCode) -> bool {
        self.by_code.contains_key(code)
    }

    /// The root node: the first single-segment code in sorted order.
    pub fn root(&self) -> Option<&WbsNode> {
        self.nodes.iter().find(|n| n.code.level() == 1)
    }

    /// Direct children of a code, in code order.
    pub fn children_of<'a>(
        &'a self,
        parent: &'a WbsCode,
    ) -> impl Iterator<Item = &'a WbsNode> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.code.is_direct_child_of(parent))
    }

    /// Next free immediate-child code under `parent`.
    pub fn next_child_code(&self, parent: &WbsCode) -> WbsCode {
        next_child_code(parent, self.nodes.iter().map(|n| &n.code))
    }

    /// Nodes whose `parent_code` is set but absent, or present yet not
    /// the direct dot-prefix parent. Violations are reported, never
    /// silently dropped; callers decide whether that is fatal.
    pub fn orphans(&self) -> Vec<&WbsNode> {
        self.nodes
            .iter()
            .filter(|n| match &n.parent_code {
                Some(parent) => {
                    !self.contains(parent) || !n.code.is_direct_child_of(parent)
                }
                None => false,
            })
            .collect()
    }

    /// Run orphan validation, recording one warning per orphan.
    pub fn validate(&self, warnings: &mut Warnings) {
        for orphan in self.orphans() {
            if let Some(parent) = &orphan.parent_code {
                if !self.contains(parent) {
                    warnings.add(Warning::orphan(orphan.code.as_str(), parent.as_str()));
                } else {
                    warnings.add(Warning::misparented(orphan.code.as_str(), parent.as_str()));
                }
            }
        }
    }

    /// Merge additional nodes into a new hierarchy, keeping existing
    /// nodes untouched. Incoming duplicates of existing codes are ignored.
    pub fn merge(&self, new_nodes: Vec<WbsNode>) -> Self {
        let mut merged = self.nodes.clone();
        for node in new_nodes {
            if !self.contains(&node.code) {
                merged.push(node);
            }
        }
        merged.sort_by(|a, b| a.code.cmp(&b.code));
        let by_code = merged
            .iter()
            .enumerate()
            .map(|(i, n)| (n.code.clone(), i))
            .collect();
        Self {
            nodes: merged,
            by_code,
        }
    }

    /// All nodes in code (depth-first) order.
    pub fn nodes(&self) -> &[WbsNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &WbsNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
