//! Equipment rows as supplied by the uploaded equipment table.

use std::str::FromStr;

use smol_str::SmolStr;

/// Commissioning status of an equipment item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommissioningStatus {
    /// Commissioned as part of this project.
    #[default]
    Yes,
    /// Not commissioned; excluded from the structure entirely.
    No,
    /// To be confirmed; routed into the TBC bucket.
    Tbc,
}

impl FromStr for CommissioningStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" => Ok(Self::Yes),
            "N" | "NO" => Ok(Self::No),
            "TBC" => Ok(Self::Tbc),
            _ => Err(()),
        }
    }
}

/// One row of the flat equipment list.
///
/// Created once by the equipment-table importer and consumed read-only by
/// classification and reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentItem {
    /// Identifier, possibly with a leading `+`/`-` polarity marker.
    pub equipment_number: SmolStr,
    pub description: String,
    pub commissioning_status: CommissioningStatus,
    /// Free text with an embedded subsystem code token, e.g.
    /// `"33kV Switchroom 2 - +Z02"`.
    pub subsystem: String,
    /// Declared parent equipment; `"-"` and `""` both mean none.
    pub parent_equipment_number: Option<SmolStr>,
}

impl EquipmentItem {
    pub fn new(
        equipment_number: impl Into<SmolStr>,
        description: impl Into<String>,
        commissioning_status: CommissioningStatus,
        subsystem: impl Into<String>,
        parent_equipment_number: Option<&str>,
    ) -> Self {
        Self {
            equipment_number: equipment_number.into(),
            description: description.into(),
            commissioning_status,
            subsystem: subsystem.into(),
            parent_equipment_number: parent_equipment_number.and_then(|p| {
                let trimmed = p.trim();
                if trimmed.is_empty() || trimmed == "-" {
                    None
                } else {
                    Some(SmolStr::new(trimmed))
                }
            }),
        }
    }
}

/// Strip a single leading `+`/`-` polarity marker.
///
/// Exports drift on whether the marker is carried, so all equipment
/// lookups compare normalized numbers.
pub fn normalize_equipment_number(number: &str) -> &str {
    let trimmed = number.trim();
    trimmed
        .strip_prefix(['+', '-'])
        .unwrap_or(trimmed)
}

/// Split an equipment number into its base code and sub-device suffix.
///
/// The base code is the substring before the first `-`; the suffix keeps
/// the dash. A leading polarity `-` is not a separator. Returns `None`
/// for the suffix when the number has no dash.
pub fn split_base_and_sub_device(number: &str) -> (&str, Option<&str>) {
    let number = number.trim();
    let search_from = usize::from(number.starts_with('-'));
    match number[search_from..].find('-') {
        Some(rel) => {
            let idx = search_from + rel;
            (&number[..idx], Some(&number[idx..]))
        }
        None => (number, None),
    }
}
