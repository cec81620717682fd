//! Fresh-project hierarchy assembly.
//!
//! Builds root → Milestones, Prerequisites, one subsystem (all 11
//! categories materialized), and an optional TBC bucket from a classified
//! equipment list. Items with commissioning status `N` are excluded
//! entirely; they never appear, not even as empty placeholders.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{Warnings, WbsCode};
use crate::classify::classify;
use crate::import::ImportBundle;
use crate::model::equipment::{normalize_equipment_number, split_base_and_sub_device};
use crate::model::node::display_name;
use crate::model::{
    Category, CommissioningStatus, EquipmentItem, NodeKind, Subsystem, WbsNode,
    extract_subsystem_token, subsystem_display_text,
};

/// Assembles a complete hierarchy for a brand-new project.
#[derive(Clone, Debug)]
pub struct WbsBuilder {
    project_name: String,
}

impl WbsBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
        }
    }

    /// Build the full hierarchy from the equipment list.
    pub fn build(&self, items: &[EquipmentItem]) -> ImportBundle {
        let root = WbsCode::new("1");
        let mut nodes = vec![
            WbsNode::new(root.clone(), self.project_name.clone(), NodeKind::Root),
            WbsNode::new(root.child(1), display_name("M", "Milestones"), NodeKind::Milestone),
            WbsNode::new(root.child(2), display_name("P", "Prerequisites"), NodeKind::Prerequisite),
        ];

        // The single subsystem takes its identity from the first item
        // that carries a subsystem code token.
        let subsystem_code = root.child(3);
        let subsystem_name = items
            .iter()
            .find_map(|item| {
                let token = extract_subsystem_token(&item.subsystem)?;
                Some(Subsystem::new(1, token, subsystem_display_text(&item.subsystem)).display_name())
            })
            .unwrap_or_else(|| display_name("S1", "Subsystem"));
        nodes.push(WbsNode::new(subsystem_code.clone(), subsystem_name, NodeKind::Subsystem));

        // All 11 categories exist whether populated or not, so later
        // insertions have a deterministic slot.
        let mut category_codes: IndexMap<&'static str, WbsCode> = IndexMap::new();
        for (idx, category) in Category::ALL.iter().enumerate() {
            let code = subsystem_code.child(idx as u64 + 1);
            nodes.push(WbsNode::new(code.clone(), category.display_name(), NodeKind::Category));
            category_codes.insert(category.id, code);
        }

        // Group commissioned items by (category, base code) in encounter
        // order.
        let mut groups: IndexMap<(&'static str, SmolStr), Vec<&EquipmentItem>> = IndexMap::new();
        let mut tbc_items: Vec<&EquipmentItem> = Vec::new();
        for item in items {
            match item.commissioning_status {
                CommissioningStatus::No => continue,
                CommissioningStatus::Tbc => {
                    tbc_items.push(item);
                    continue;
                }
                CommissioningStatus::Yes => {}
            }
            let category = classify(&item.equipment_number);
            let (base, _) = split_base_and_sub_device(&item.equipment_number);
            let key = (category.id, SmolStr::new(normalize_equipment_number(base)));
            groups.entry(key).or_default().push(item);
        }

        let mut per_category_count: IndexMap<&'static str, u64> = IndexMap::new();
        for ((category_id, _), group) in &groups {
            let slot = per_category_count.entry(*category_id).or_insert(0);
            *slot += 1;
            let parent_code = category_codes[*category_id].child(*slot);

            // The bare base item (no sub-device suffix) heads the group;
            // without one, the first item stands in for the base.
            let head_idx = group
                .iter()
                .position(|item| split_base_and_sub_device(&item.equipment_number).1.is_none())
                .unwrap_or(0);
            let head = group[head_idx];
            let (head_base, _) = split_base_and_sub_device(&head.equipment_number);
            nodes.push(WbsNode::new(
                parent_code.clone(),
                display_name(head_base, &head.description),
                NodeKind::Equipment,
            ));

            let mut child_no = 0;
            for (idx, item) in group.iter().enumerate() {
                if idx == head_idx {
                    continue;
                }
                child_no += 1;
                let kind = match split_base_and_sub_device(&item.equipment_number).1 {
                    Some(_) => NodeKind::SubDevice,
                    None => NodeKind::Equipment,
                };
                nodes.push(WbsNode::new(
                    parent_code.child(child_no),
                    display_name(&item.equipment_number, &item.description),
                    kind,
                ));
            }
        }

        // TBC items go into their own holding bucket beneath the root.
        if !tbc_items.is_empty() {
            let bucket = root.child(4);
            nodes.push(WbsNode::new(
                bucket.clone(),
                display_name("TBC", "To Be Confirmed"),
                NodeKind::Bucket,
            ));
            for (idx, item) in tbc_items.iter().enumerate() {
                nodes.push(WbsNode::new(
                    bucket.child(idx as u64 + 1),
                    display_name(&item.equipment_number, &item.description),
                    NodeKind::Equipment,
                ));
            }
        }

        tracing::debug!(
            items = items.len(),
            nodes = nodes.len(),
            "fresh hierarchy built"
        );
        ImportBundle::assemble(nodes, Warnings::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(number: &str, desc: &str, status: CommissioningStatus, parent: Option<&str>) -> EquipmentItem {
        EquipmentItem::new(number, desc, status, "33kV Switchroom 2 - +Z02", parent)
    }

    fn yes(number: &str, desc: &str) -> EquipmentItem {
        item(number, desc, CommissioningStatus::Yes, None)
    }

    #[test]
    fn test_skeleton_nodes_present() {
        let bundle = WbsBuilder::new("Substation Upgrade").build(&[yes("+UH101", "Board")]);
        let h = &bundle.hierarchy;

        assert_eq!(h.root().unwrap().name, "Substation Upgrade");
        assert_eq!(h.get(&WbsCode::new("1.1")).unwrap().name, "M | Milestones");
        assert_eq!(h.get(&WbsCode::new("1.2")).unwrap().name, "P | Prerequisites");
        assert_eq!(
            h.get(&WbsCode::new("1.3")).unwrap().name,
            "S1 | +Z02 - 33kV Switchroom 2"
        );
        assert_eq!(bundle.subsystems.len(), 1);
    }

    #[test]
    fn test_all_eleven_categories_materialized() {
        let bundle = WbsBuilder::new("P").build(&[yes("+UH101", "Board")]);
        let subsystem = WbsCode::new("1.3");
        let categories: Vec<&WbsNode> = bundle
            .hierarchy
            .children_of(&subsystem)
            .filter(|n| n.kind == NodeKind::Category)
            .collect();
        assert_eq!(categories.len(), 11);
        assert_eq!(categories[0].name, "01 | HV Switchgear");
        assert_eq!(categories[10].name, "99 | Unrecognised Equipment");
    }

    #[test]
    fn test_equipment_lands_in_its_category() {
        let bundle = WbsBuilder::new("P").build(&[yes("+UH101", "Board"), yes("T5", "Transformer")]);
        // 02 is the second category: 1.3.2; 05 is 1.3.5.
        let board = bundle.hierarchy.get(&WbsCode::new("1.3.2.1")).unwrap();
        assert_eq!(board.name, "+UH101 | Board");
        let tx = bundle.hierarchy.get(&WbsCode::new("1.3.5.1")).unwrap();
        assert_eq!(tx.name, "T5 | Transformer");
    }

    #[test]
    fn test_sub_devices_grouped_under_base() {
        let bundle = WbsBuilder::new("P").build(&[
            yes("+UH101", "Board"),
            yes("+UH101-F1", "Feeder relay"),
            yes("+UH101-F2", "Incomer relay"),
            yes("+UH102", "Second board"),
        ]);
        let h = &bundle.hierarchy;
        assert_eq!(h.get(&WbsCode::new("1.3.2.1")).unwrap().name, "+UH101 | Board");
        assert_eq!(h.get(&WbsCode::new("1.3.2.1.1")).unwrap().name, "+UH101-F1 | Feeder relay");
        assert_eq!(h.get(&WbsCode::new("1.3.2.1.2")).unwrap().name, "+UH101-F2 | Incomer relay");
        assert_eq!(h.get(&WbsCode::new("1.3.2.2")).unwrap().name, "+UH102 | Second board");
        assert_eq!(h.get(&WbsCode::new("1.3.2.1.1")).unwrap().kind, NodeKind::SubDevice);
    }

    #[test]
    fn test_group_without_bare_base_synthesizes_parent() {
        let bundle = WbsBuilder::new("P").build(&[
            yes("+UH101-F1", "Feeder relay"),
            yes("+UH101-F2", "Incomer relay"),
        ]);
        let h = &bundle.hierarchy;
        let parent = h.get(&WbsCode::new("1.3.2.1")).unwrap();
        assert_eq!(parent.name, "+UH101 | Feeder relay");
        // The stand-in item heads the group; only the second becomes a child.
        assert_eq!(h.get(&WbsCode::new("1.3.2.1.1")).unwrap().name, "+UH101-F2 | Incomer relay");
    }

    #[test]
    fn test_status_n_excluded_entirely() {
        let bundle = WbsBuilder::new("P").build(&[
            yes("+UH101", "Board"),
            item("T5", "Decommissioned unit", CommissioningStatus::No, None),
        ]);
        assert!(
            !bundle
                .hierarchy
                .iter()
                .any(|n| n.name.contains("Decommissioned"))
        );
        assert!(bundle.equipment_index.get("T5").is_none());
        // The transformers category is still materialized, just empty.
        let tx_cat = WbsCode::new("1.3.5");
        assert!(bundle.hierarchy.contains(&tx_cat));
        assert_eq!(bundle.hierarchy.children_of(&tx_cat).count(), 0);
    }

    #[test]
    fn test_tbc_items_bucketed() {
        let bundle = WbsBuilder::new("P").build(&[
            yes("+UH101", "Board"),
            item("GB01", "Battery bank", CommissioningStatus::Tbc, None),
        ]);
        let h = &bundle.hierarchy;
        let bucket = h.get(&WbsCode::new("1.4")).unwrap();
        assert_eq!(bucket.kind, NodeKind::Bucket);
        assert_eq!(h.get(&WbsCode::new("1.4.1")).unwrap().name, "GB01 | Battery bank");
    }

    #[test]
    fn test_no_tbc_bucket_without_tbc_items() {
        let bundle = WbsBuilder::new("P").build(&[yes("+UH101", "Board")]);
        assert!(!bundle.hierarchy.contains(&WbsCode::new("1.4")));
    }

    #[test]
    fn test_no_orphans_in_fresh_build() {
        let bundle = WbsBuilder::new("P").build(&[
            yes("+UH101", "Board"),
            yes("+UH101-F1", "Relay"),
            yes("ZZZ1", "Mystery box"),
        ]);
        assert!(bundle.hierarchy.orphans().is_empty());
        assert!(bundle.warnings.is_empty());
        // Unrecognised equipment lands in 99 (the 11th category).
        assert_eq!(
            bundle.hierarchy.get(&WbsCode::new("1.3.11.1")).unwrap().name,
            "ZZZ1 | Mystery box"
        );
    }
}
