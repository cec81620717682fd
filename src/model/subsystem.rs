//! Subsystems and their external code tokens.

use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

/// Marker token embedded in free text, e.g. `+Z02` in
/// `"33kV Switchroom 2 - +Z02"`.
static SUBSYSTEM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-][A-Z]\d{2,}").expect("subsystem token pattern"));

/// Subsystem node name: `S<n> | <token> - <description>`.
static SUBSYSTEM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^S(\d+)\s*\|\s*([+-][A-Z]\d{2,})\s*-\s*(.+)$").expect("subsystem name pattern")
});

/// A top-level functional grouping of equipment within a project.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subsystem {
    /// Sequential number, unique per project, displayed as `S<number>`.
    pub number: u32,
    /// External marker token, e.g. `+Z02`.
    pub code: SmolStr,
    pub name: String,
}

impl Subsystem {
    pub fn new(number: u32, code: impl Into<SmolStr>, name: impl Into<String>) -> Self {
        Self {
            number,
            code: code.into(),
            name: name.into(),
        }
    }

    /// Node display name, e.g. `"S2 | +Z03 - Control Room"`.
    pub fn display_name(&self) -> String {
        format!("S{} | {} - {}", self.number, self.code, self.name)
    }

    /// Parse a subsystem out of a node name matching the fixed pattern
    /// `S<n> | <token> - <description>`.
    pub fn from_node_name(name: &str) -> Option<Subsystem> {
        let caps = SUBSYSTEM_NAME.captures(name.trim())?;
        let number = caps[1].parse().ok()?;
        Some(Subsystem::new(number, &caps[2], caps[3].trim()))
    }
}

/// Extract the first subsystem code token from free text.
pub fn extract_subsystem_token(text: &str) -> Option<SmolStr> {
    SUBSYSTEM_TOKEN.find(text).map(|m| SmolStr::new(m.as_str()))
}

/// Parse the `S<n>` number out of a subsystem name token.
pub fn subsystem_number_from_token(token: &str) -> Option<u32> {
    token.strip_prefix('S')?.parse().ok()
}

/// Human description of a subsystem field with its token removed, e.g.
/// `"33kV Switchroom 2 - +Z02"` becomes `"33kV Switchroom 2"`.
pub fn subsystem_display_text(text: &str) -> String {
    let stripped = SUBSYSTEM_TOKEN.replace(text, "");
    stripped
        .trim()
        .trim_end_matches('-')
        .trim_start_matches('-')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token() {
        assert_eq!(
            extract_subsystem_token("33kV Switchroom 2 - +Z02").as_deref(),
            Some("+Z02")
        );
        assert_eq!(extract_subsystem_token("-X105 feeder bay").as_deref(), Some("-X105"));
        assert_eq!(extract_subsystem_token("no token here"), None);
        // A single trailing digit is not a valid token.
        assert_eq!(extract_subsystem_token("+Z2 short"), None);
    }

    #[test]
    fn test_from_node_name() {
        let sub = Subsystem::from_node_name("S2 | +Z03 - Control Room").unwrap();
        assert_eq!(sub.number, 2);
        assert_eq!(sub.code, "+Z03");
        assert_eq!(sub.name, "Control Room");
        assert!(Subsystem::from_node_name("M | Milestones").is_none());
        assert!(Subsystem::from_node_name("S2 | no token - x").is_none());
    }

    #[test]
    fn test_display_round_trip() {
        let sub = Subsystem::new(4, "+Z11", "35kV Switchroom");
        assert_eq!(Subsystem::from_node_name(&sub.display_name()), Some(sub));
    }

    #[test]
    fn test_display_text_strips_token() {
        assert_eq!(subsystem_display_text("33kV Switchroom 2 - +Z02"), "33kV Switchroom 2");
        assert_eq!(subsystem_display_text("+Z02 - 33kV Switchroom 2"), "33kV Switchroom 2");
        assert_eq!(subsystem_display_text("Control Room"), "Control Room");
    }

    #[test]
    fn test_number_from_token() {
        assert_eq!(subsystem_number_from_token("S12"), Some(12));
        assert_eq!(subsystem_number_from_token("M"), None);
    }
}
