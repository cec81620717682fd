//! The 11 fixed equipment category buckets.
//!
//! Categories are structural constants, not derived data: all 11 are
//! materialized under every subsystem whether populated or not, so later
//! insertions always have a deterministic slot.

/// One of the fixed category buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Category {
    /// Two-digit id: `"01"`..`"10"`, or `"99"` for unrecognised.
    pub id: &'static str,
    /// Fixed display name.
    pub name: &'static str,
}

impl Category {
    /// All 11 buckets in their fixed structural order.
    pub const ALL: [Category; 11] = [
        Category { id: "01", name: "HV Switchgear" },
        Category { id: "02", name: "LV Switchgear & Distribution" },
        Category { id: "03", name: "Protection & Control" },
        Category { id: "04", name: "DC Systems & UPS" },
        Category { id: "05", name: "Transformers" },
        Category { id: "06", name: "Cables & Reticulation" },
        Category { id: "07", name: "Earthing & Lightning Protection" },
        Category { id: "08", name: "Metering & Instrumentation" },
        Category { id: "09", name: "Control Systems & Communications" },
        Category { id: "10", name: "Building Services" },
        Category { id: "99", name: "Unrecognised Equipment" },
    ];

    /// The fallback bucket for identifiers no rule matches.
    pub const UNRECOGNISED: Category = Self::ALL[10];

    /// Look a bucket up by its two-digit id.
    pub fn by_id(id: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.id == id)
    }

    /// Node display name, e.g. `"05 | Transformers"`.
    pub fn display_name(&self) -> String {
        super::node::display_name(self.id, self.name)
    }
}
