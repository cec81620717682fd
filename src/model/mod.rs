//! Data model: nodes, hierarchies, equipment rows, categories, subsystems.

pub mod category;
pub mod equipment;
pub mod hierarchy;
pub mod node;
pub mod subsystem;

pub use category::Category;
pub use equipment::{
    CommissioningStatus, EquipmentItem, normalize_equipment_number, split_base_and_sub_device,
};
pub use hierarchy::Hierarchy;
pub use node::{NodeKind, WbsNode, display_name, equipment_token, is_structural_token, split_name};
pub use subsystem::{
    Subsystem, extract_subsystem_token, subsystem_display_text, subsystem_number_from_token,
};
