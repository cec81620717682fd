//! Three-tier placement of new equipment into an existing hierarchy.
//!
//! Each incoming item is tried against three tiers in order, falling
//! through on a miss. A miss is ordinary control flow, never an error:
//!
//! 1. explicit parent - the item names a parent equipment number that is
//!    already in the WBS; attach directly beneath that node.
//! 2. existing subsystem - the item's subsystem token matches a
//!    subsystem node whose category child for the item exists.
//! 3. new subsystem - scaffold a fresh `S<n>` subsystem with all 11
//!    categories, memoized per token so one batch creates it once.
//!
//! Items with no subsystem token at all are routed to a root-level `99`
//! holding bucket instead, created at most once per batch. Child numbering
//! always counts existing and batch-created siblings together.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{Warning, WarningKind, Warnings, WbsCode, next_child_code};
use crate::classify::classify;
use crate::import::ImportBundle;
use crate::model::equipment::{normalize_equipment_number, split_base_and_sub_device};
use crate::model::node::display_name;
use crate::model::{
    Category, CommissioningStatus, EquipmentItem, Hierarchy, NodeKind, Subsystem, WbsNode,
    extract_subsystem_token, subsystem_display_text, subsystem_number_from_token,
};

/// Result of reconciling a batch of equipment against an existing WBS.
#[derive(Clone, Debug)]
pub struct ReconcileOutcome {
    /// The existing hierarchy with all batch nodes merged in.
    pub hierarchy: Hierarchy,
    /// Every node created by this batch, in code order, `is_new` set.
    pub new_items: Vec<WbsNode>,
    pub warnings: Vec<Warning>,
}

/// Places new equipment into an already-imported hierarchy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Reconcile `items` against `existing`.
    ///
    /// The existing hierarchy is never mutated; every created node is
    /// returned in `new_items` and also merged into the outcome
    /// hierarchy. An empty batch returns the hierarchy unchanged.
    pub fn reconcile(&self, existing: &ImportBundle, items: &[EquipmentItem]) -> ReconcileOutcome {
        let mut warnings = Warnings::new();

        let Some(root) = existing.hierarchy.root().map(|n| n.code.clone()) else {
            warnings.add(Warning::new(
                WarningKind::SkippedRow,
                format!("{} items skipped: hierarchy has no root node", items.len()),
            ));
            return ReconcileOutcome {
                hierarchy: existing.hierarchy.clone(),
                new_items: Vec::new(),
                warnings: warnings.into_vec(),
            };
        };

        let mut batch = Batch {
            existing: &existing.hierarchy,
            root,
            new_nodes: Vec::new(),
            equipment_index: existing.equipment_index.clone(),
            subsystem_memo: FxHashMap::default(),
            bucket_code: None,
        };

        for item in items {
            // Non-commissioned equipment never enters the structure.
            if item.commissioning_status == CommissioningStatus::No {
                continue;
            }
            batch.place(item);
        }

        let mut new_items = batch.new_nodes;
        new_items.sort_by(|a, b| a.code.cmp(&b.code));
        let hierarchy = existing.hierarchy.merge(new_items.clone());

        tracing::debug!(
            batch = items.len(),
            created = new_items.len(),
            "reconciliation complete"
        );
        ReconcileOutcome {
            hierarchy,
            new_items,
            warnings: warnings.into_vec(),
        }
    }
}

/// Working state for one reconciliation batch.
struct Batch<'a> {
    existing: &'a Hierarchy,
    root: WbsCode,
    new_nodes: Vec<WbsNode>,
    /// Normalized equipment number → node code, existing plus
    /// batch-created, so later items can name earlier ones as parents.
    equipment_index: IndexMap<SmolStr, WbsCode>,
    /// Subsystem token → subsystem code scaffolded by this batch.
    subsystem_memo: FxHashMap<SmolStr, WbsCode>,
    /// Root-level `99` holding bucket, created at most once.
    bucket_code: Option<WbsCode>,
}

impl Batch<'_> {
    fn place(&mut self, item: &EquipmentItem) {
        // Tier 1: explicit parent reference.
        if let Some(parent_number) = &item.parent_equipment_number {
            let key = normalize_equipment_number(parent_number);
            if let Some(parent_code) = self.equipment_index.get(key).cloned() {
                tracing::debug!(number = %item.equipment_number, parent = %parent_code, "tier 1");
                self.attach(&parent_code, item);
                return;
            }
        }

        // Tier 2 and 3 both need the subsystem token; without one the
        // item has nowhere meaningful to go but the holding bucket.
        let Some(token) = extract_subsystem_token(&item.subsystem) else {
            let bucket = self.ensure_bucket();
            tracing::debug!(number = %item.equipment_number, "no subsystem token, bucketed");
            self.attach(&bucket, item);
            return;
        };
        let category = classify(&item.equipment_number);

        // Tier 2: a subsystem scaffolded earlier in this batch, or an
        // existing subsystem node that already carries the category.
        if let Some(sub_code) = self.subsystem_memo.get(&token).cloned() {
            let category_code = self
                .category_child(&sub_code, category)
                .unwrap_or_else(|| sub_code.child(1));
            tracing::debug!(number = %item.equipment_number, subsystem = %sub_code, "tier 2 (batch)");
            self.attach(&category_code, item);
            return;
        }
        if let Some(sub_code) = self.find_existing_subsystem(&token) {
            if let Some(category_code) = self.category_child(&sub_code, category) {
                tracing::debug!(number = %item.equipment_number, subsystem = %sub_code, "tier 2");
                self.attach(&category_code, item);
                return;
            }
        }

        // Tier 3: scaffold a new subsystem with the full category set.
        let sub_code = self.create_subsystem(&token, &item.subsystem);
        let category_code = self
            .category_child(&sub_code, category)
            .unwrap_or_else(|| sub_code.child(1));
        tracing::debug!(number = %item.equipment_number, subsystem = %sub_code, "tier 3");
        self.attach(&category_code, item);
    }

    /// Create the equipment node for `item` beneath `parent`.
    fn attach(&mut self, parent: &WbsCode, item: &EquipmentItem) {
        let code = self.next_child(parent);
        let kind = match split_base_and_sub_device(&item.equipment_number).1 {
            Some(_) => NodeKind::SubDevice,
            None => NodeKind::Equipment,
        };
        let name = display_name(&item.equipment_number, &item.description);
        self.new_nodes.push(WbsNode::new(code.clone(), name, kind).flag_new());
        self.equipment_index
            .entry(SmolStr::new(normalize_equipment_number(&item.equipment_number)))
            .or_insert(code);
    }

    /// Next free child slot under `parent`, counting existing and
    /// batch-created siblings together.
    fn next_child(&self, parent: &WbsCode) -> WbsCode {
        next_child_code(
            parent,
            self.existing
                .iter()
                .map(|n| &n.code)
                .chain(self.new_nodes.iter().map(|n| &n.code)),
        )
    }

    /// Root-direct subsystem node whose name carries `token`.
    fn find_existing_subsystem(&self, token: &str) -> Option<WbsCode> {
        self.existing
            .children_of(&self.root)
            .find(|n| n.kind == NodeKind::Subsystem && n.name.contains(token))
            .map(|n| n.code.clone())
    }

    /// The category child of a subsystem, existing or batch-created.
    fn category_child(&self, subsystem: &WbsCode, category: Category) -> Option<WbsCode> {
        self.existing
            .children_of(subsystem)
            .chain(
                self.new_nodes
                    .iter()
                    .filter(|n| n.code.is_direct_child_of(subsystem)),
            )
            .find(|n| n.name_token() == Some(category.id))
            .map(|n| n.code.clone())
    }

    /// Scaffold a new `S<n>` subsystem with all 11 categories.
    fn create_subsystem(&mut self, token: &SmolStr, subsystem_text: &str) -> WbsCode {
        let number = self.next_subsystem_number();
        let sub_code = self.next_child(&self.root);

        let subsystem = Subsystem::new(number, token.clone(), subsystem_display_text(subsystem_text));
        self.new_nodes.push(
            WbsNode::new(sub_code.clone(), subsystem.display_name(), NodeKind::Subsystem)
                .flag_new(),
        );
        for (idx, category) in Category::ALL.iter().enumerate() {
            self.new_nodes.push(
                WbsNode::new(
                    sub_code.child(idx as u64 + 1),
                    category.display_name(),
                    NodeKind::Category,
                )
                .flag_new(),
            );
        }

        self.subsystem_memo.insert(token.clone(), sub_code.clone());
        sub_code
    }

    /// Next sequential `S<n>` number across existing and batch-created
    /// root-direct subsystem nodes.
    fn next_subsystem_number(&self) -> u32 {
        let max = self
            .existing
            .children_of(&self.root)
            .chain(
                self.new_nodes
                    .iter()
                    .filter(|n| n.code.is_direct_child_of(&self.root)),
            )
            .filter(|n| n.kind == NodeKind::Subsystem)
            .filter_map(|n| subsystem_number_from_token(n.name_token()?))
            .max()
            .unwrap_or(0);
        max + 1
    }

    /// Find or create the root-level `99` holding bucket.
    fn ensure_bucket(&mut self) -> WbsCode {
        if let Some(code) = &self.bucket_code {
            return code.clone();
        }
        let found = self
            .existing
            .children_of(&self.root)
            .find(|n| n.name_token() == Some(Category::UNRECOGNISED.id))
            .map(|n| n.code.clone());
        let code = match found {
            Some(code) => code,
            None => {
                let code = self.next_child(&self.root);
                self.new_nodes.push(
                    WbsNode::new(code.clone(), Category::UNRECOGNISED.display_name(), NodeKind::Bucket)
                        .flag_new(),
                );
                code
            }
        };
        self.bucket_code = Some(code.clone());
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Warnings;
    use crate::model::node::kind_from_name;

    fn node(code: &str, name: &str) -> WbsNode {
        let code = WbsCode::new(code);
        let kind = kind_from_name(&code, name);
        WbsNode::new(code, name, kind)
    }

    /// Existing project: S1 with categories 01, 02, 05 populated and one
    /// board already under 02.
    fn existing() -> ImportBundle {
        ImportBundle::assemble(
            vec![
                node("1", "Substation Upgrade"),
                node("1.1", "M | Milestones"),
                node("1.2", "P | Prerequisites"),
                node("1.3", "S1 | +Z02 - 33kV Switchroom 2"),
                node("1.3.1", "01 | HV Switchgear"),
                node("1.3.2", "02 | LV Switchgear & Distribution"),
                node("1.3.2.1", "+UH101 | Distribution board"),
                node("1.3.2.1.1", "+UH101-F1 | Feeder relay"),
                node("1.3.5", "05 | Transformers"),
            ],
            Warnings::new(),
        )
    }

    fn item(number: &str, subsystem: &str, parent: Option<&str>) -> EquipmentItem {
        EquipmentItem::new(number, "New equipment", CommissioningStatus::Yes, subsystem, parent)
    }

    #[test]
    fn test_empty_batch_leaves_hierarchy_unchanged() {
        let bundle = existing();
        let outcome = ReconciliationEngine::new().reconcile(&bundle, &[]);
        assert!(outcome.new_items.is_empty());
        assert_eq!(outcome.hierarchy.len(), bundle.hierarchy.len());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_tier1_explicit_parent() {
        let outcome = ReconciliationEngine::new()
            .reconcile(&existing(), &[item("+UH101-F2", "", Some("+UH101"))]);
        assert_eq!(outcome.new_items.len(), 1);
        let new = &outcome.new_items[0];
        // Next slot under the board: -F1 already occupies .1.
        assert_eq!(new.code.as_str(), "1.3.2.1.2");
        assert_eq!(new.kind, NodeKind::SubDevice);
        assert!(new.is_new);
    }

    #[test]
    fn test_tier1_parent_normalizes_polarity() {
        let outcome = ReconciliationEngine::new()
            .reconcile(&existing(), &[item("+UH101-F2", "", Some("UH101"))]);
        assert_eq!(outcome.new_items[0].code.as_str(), "1.3.2.1.2");
    }

    #[test]
    fn test_tier2_existing_subsystem_and_category() {
        // T9 classifies to 05, which exists under S1.
        let outcome = ReconciliationEngine::new()
            .reconcile(&existing(), &[item("T9", "Switchroom - +Z02", None)]);
        assert_eq!(outcome.new_items.len(), 1);
        assert_eq!(outcome.new_items[0].code.as_str(), "1.3.5.1");
    }

    #[test]
    fn test_tier2_counts_batch_siblings() {
        let outcome = ReconciliationEngine::new().reconcile(
            &existing(),
            &[
                item("+UH201", "+Z02", None),
                item("+UH202", "+Z02", None),
            ],
        );
        // Category 02 already holds one child; the batch fills .2 and .3.
        let codes: Vec<&str> = outcome.new_items.iter().map(|n| n.code.as_str()).collect();
        assert_eq!(codes, vec!["1.3.2.2", "1.3.2.3"]);
    }

    #[test]
    fn test_tier3_new_subsystem_scaffolds_all_categories() {
        let outcome = ReconciliationEngine::new()
            .reconcile(&existing(), &[item("+UH301", "11kV Switchroom - +Z05", None)]);
        // Subsystem node + 11 categories + 1 equipment node.
        assert_eq!(outcome.new_items.len(), 13);

        let sub = outcome
            .new_items
            .iter()
            .find(|n| n.kind == NodeKind::Subsystem)
            .unwrap();
        assert_eq!(sub.code.as_str(), "1.4");
        assert_eq!(sub.name, "S2 | +Z05 - 11kV Switchroom");

        // +UH301 classifies to 02, the second category slot.
        let equipment = outcome
            .new_items
            .iter()
            .find(|n| n.kind == NodeKind::Equipment)
            .unwrap();
        assert_eq!(equipment.code.as_str(), "1.4.2.1");
        assert!(outcome.hierarchy.orphans().is_empty());
    }

    #[test]
    fn test_tier3_memoized_per_token() {
        let outcome = ReconciliationEngine::new().reconcile(
            &existing(),
            &[
                item("+UH301", "11kV Switchroom - +Z05", None),
                item("+UH302", "11kV Switchroom - +Z05", None),
            ],
        );
        // One scaffold, two equipment nodes.
        let subsystems = outcome
            .new_items
            .iter()
            .filter(|n| n.kind == NodeKind::Subsystem)
            .count();
        assert_eq!(subsystems, 1);
        assert!(outcome.hierarchy.contains(&WbsCode::new("1.4.2.1")));
        assert!(outcome.hierarchy.contains(&WbsCode::new("1.4.2.2")));
    }

    #[test]
    fn test_tier3_miss_on_missing_category() {
        // GB01 classifies to 04, which S1 does not carry, so a new
        // subsystem is scaffolded even though the token matches S1.
        let outcome = ReconciliationEngine::new()
            .reconcile(&existing(), &[item("GB01", "Switchroom - +Z02", None)]);
        let sub = outcome
            .new_items
            .iter()
            .find(|n| n.kind == NodeKind::Subsystem)
            .unwrap();
        assert_eq!(sub.code.as_str(), "1.4");
        assert_eq!(outcome.hierarchy.children_of(&sub.code).count(), 11);
    }

    #[test]
    fn test_empty_token_routes_to_bucket_created_once() {
        let outcome = ReconciliationEngine::new().reconcile(
            &existing(),
            &[
                item("XX1", "no token here", None),
                item("XX2", "", None),
            ],
        );
        let bucket = outcome
            .new_items
            .iter()
            .find(|n| n.kind == NodeKind::Bucket)
            .unwrap();
        assert_eq!(bucket.code.as_str(), "1.4");
        assert_eq!(bucket.name, "99 | Unrecognised Equipment");
        let children: Vec<&str> = outcome
            .hierarchy
            .children_of(&bucket.code)
            .map(|n| n.code.as_str())
            .collect();
        assert_eq!(children, vec!["1.4.1", "1.4.2"]);
    }

    #[test]
    fn test_status_n_items_skipped() {
        let skipped = EquipmentItem::new(
            "T9",
            "Not ours",
            CommissioningStatus::No,
            "Switchroom - +Z02",
            None,
        );
        let outcome = ReconciliationEngine::new().reconcile(&existing(), &[skipped]);
        assert!(outcome.new_items.is_empty());
    }

    #[test]
    fn test_subsystem_numbering_continues_from_existing() {
        let outcome = ReconciliationEngine::new().reconcile(
            &existing(),
            &[
                item("+UH301", "A - +Z05", None),
                item("+UH401", "B - +Z07", None),
            ],
        );
        let names: Vec<&str> = outcome
            .new_items
            .iter()
            .filter(|n| n.kind == NodeKind::Subsystem)
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["S2 | +Z05 - A", "S3 | +Z07 - B"]);
    }
}
