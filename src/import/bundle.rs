//! Canonical import output shared by both text parsers.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{WbsCode, Warnings};
use crate::model::node::equipment_token;
use crate::model::{Hierarchy, Subsystem, WbsNode, normalize_equipment_number};

/// The canonical result of importing an existing WBS hierarchy.
#[derive(Clone, Debug, Default)]
pub struct ImportBundle {
    /// The deduplicated, sorted, orphan-validated hierarchy.
    pub hierarchy: Hierarchy,
    /// Subsystems registered from `S<n> | <token> - <desc>` node names.
    pub subsystems: Vec<Subsystem>,
    /// Normalized equipment number → WBS code of its node.
    pub equipment_index: IndexMap<SmolStr, WbsCode>,
    /// Display name of the project root, when one was found.
    pub project_name: Option<String>,
    /// Recoverable data warnings collected during the import.
    pub warnings: Vec<crate::base::Warning>,
}

impl ImportBundle {
    /// Assemble a bundle from parsed nodes: dedup, sort, validate, and
    /// post-process names for equipment and subsystem registration.
    pub fn assemble(nodes: Vec<WbsNode>, mut warnings: Warnings) -> Self {
        let hierarchy = Hierarchy::from_nodes(nodes, &mut warnings);
        hierarchy.validate(&mut warnings);

        let mut equipment_index: IndexMap<SmolStr, WbsCode> = IndexMap::new();
        let mut subsystems = Vec::new();

        for node in hierarchy.iter() {
            if let Some(sub) = Subsystem::from_node_name(&node.name) {
                subsystems.push(sub);
                continue;
            }
            if let Some(number) = equipment_token(&node.name) {
                let normalized = SmolStr::new(normalize_equipment_number(&number));
                equipment_index
                    .entry(normalized)
                    .or_insert_with(|| node.code.clone());
            }
        }

        let project_name = hierarchy.root().map(|n| n.name.clone());

        tracing::debug!(
            nodes = hierarchy.len(),
            subsystems = subsystems.len(),
            equipment = equipment_index.len(),
            "import bundle assembled"
        );

        Self {
            hierarchy,
            subsystems,
            equipment_index,
            project_name,
            warnings: warnings.into_vec(),
        }
    }
}
