//! Hierarchical WBS code handling.
//!
//! A WBS code is a dot-separated sequence of positive integers such as
//! `"1.3.2.5"`. Codes order numerically segment by segment, never
//! lexically: `"1.10"` sorts after `"1.9"`.

use std::fmt;

use smol_str::SmolStr;

/// A hierarchical WBS code like `"1.3.2"`.
///
/// The level of a node is the number of dot-segments of its code; it is
/// always derived, never stored separately.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WbsCode(SmolStr);

impl WbsCode {
    /// Create a code from a raw string without validation.
    ///
    /// Use [`WbsCode::parse`] at import boundaries where the input is
    /// untrusted.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code.as_ref()))
    }

    /// Parse and validate a code: every dot-segment must be a positive
    /// integer.
    pub fn parse(code: &str) -> Option<Self> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return None;
        }
        for seg in trimmed.split('.') {
            match seg.parse::<u64>() {
                Ok(n) if n > 0 => {}
                _ => return None,
            }
        }
        Some(Self(SmolStr::new(trimmed)))
    }

    /// The underlying string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric segments, left to right. A segment that fails to parse
    /// counts as 0 so comparison stays total on malformed input.
    pub fn segments(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.split('.').map(|s| s.parse::<u64>().unwrap_or(0))
    }

    /// Number of dot-segments (the node's level).
    pub fn level(&self) -> usize {
        self.0.split('.').count()
    }

    /// The final segment of the code.
    pub fn last_segment(&self) -> u64 {
        self.segments().last().unwrap_or(0)
    }

    /// The code with its last segment removed, or `None` for a
    /// single-segment (root-level) code.
    pub fn parent(&self) -> Option<WbsCode> {
        let idx = self.0.rfind('.')?;
        Some(Self(SmolStr::new(&self.0[..idx])))
    }

    /// Append a child segment: `"1.3".child(2)` is `"1.3.2"`.
    pub fn child(&self, n: u64) -> WbsCode {
        Self(SmolStr::new(format!("{}.{}", self.0, n)))
    }

    /// Whether `self` is an immediate child of `parent`: a strict
    /// dot-prefix of `self` exactly one segment shorter.
    pub fn is_direct_child_of(&self, parent: &WbsCode) -> bool {
        self.parent().as_ref() == Some(parent)
    }
}

impl Ord for WbsCode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let mut a = self.segments();
        let mut b = other.segments();
        loop {
            match (a.next(), b.next()) {
                (None, None) => break,
                // A missing segment compares as 0, which a positive
                // segment always exceeds.
                (Some(x), None) => match x.cmp(&0) {
                    std::cmp::Ordering::Equal => {}
                    ord => return ord,
                },
                (None, Some(y)) => match 0.cmp(&y) {
                    std::cmp::Ordering::Equal => {}
                    ord => return ord,
                },
                (Some(x), Some(y)) => match x.cmp(&y) {
                    std::cmp::Ordering::Equal => {}
                    ord => return ord,
                },
            }
        }
        // Tie-break on segment count so Ord stays consistent with Eq for
        // degenerate codes like "1" vs "1.0".
        self.level()
            .cmp(&other.level())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for WbsCode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for WbsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WbsCode({})", self.0)
    }
}

impl fmt::Display for WbsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WbsCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Compute the next free immediate-child code under `parent`.
///
/// Only immediate children (`parent.N` with no further segments) count;
/// the result is `parent.(max + 1)`, or `parent.1` when no children
/// exist.
pub fn next_child_code<'a>(
    parent: &WbsCode,
    existing: impl IntoIterator<Item = &'a WbsCode>,
) -> WbsCode {
    let max = existing
        .into_iter()
        .filter(|c| c.is_direct_child_of(parent))
        .map(|c| c.last_segment())
        .max()
        .unwrap_or(0);
    parent.child(max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> WbsCode {
        WbsCode::new(s)
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(code("1.9") < code("1.10"));
        assert!(code("1.10") < code("1.10.1"));
        assert!(code("1.2") < code("1.10"));
        assert!(code("2") > code("1.99.99"));
        assert_eq!(code("1.3").cmp(&code("1.3")), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_parent() {
        assert_eq!(code("1.3.2").parent(), Some(code("1.3")));
        assert_eq!(code("1").parent(), None);
    }

    #[test]
    fn test_level_and_segments() {
        assert_eq!(code("1.3.2.5").level(), 4);
        let segs: Vec<u64> = code("1.3.2").segments().collect();
        assert_eq!(segs, vec![1, 3, 2]);
    }

    #[test]
    fn test_direct_child() {
        assert!(code("1.3.2").is_direct_child_of(&code("1.3")));
        assert!(!code("1.3.2.1").is_direct_child_of(&code("1.3")));
        assert!(!code("1.4").is_direct_child_of(&code("1.3")));
    }

    #[test]
    fn test_next_child_code() {
        let existing = [code("1.3.1"), code("1.3.2")];
        assert_eq!(next_child_code(&code("1.3"), &existing), code("1.3.3"));
        assert_eq!(next_child_code(&code("1.3"), &[]), code("1.3.1"));
    }

    #[test]
    fn test_next_child_code_ignores_grandchildren() {
        let existing = [code("1.3.1"), code("1.3.1.7"), code("1.4.9")];
        assert_eq!(next_child_code(&code("1.3"), &existing), code("1.3.2"));
    }

    #[test]
    fn test_next_child_code_gap() {
        // Gaps are not filled; numbering continues past the max.
        let existing = [code("1.3.1"), code("1.3.5")];
        assert_eq!(next_child_code(&code("1.3"), &existing), code("1.3.6"));
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        assert!(WbsCode::parse("1.3.2").is_some());
        assert!(WbsCode::parse(" 1.2 ").is_some());
        assert!(WbsCode::parse("").is_none());
        assert!(WbsCode::parse("1..2").is_none());
        assert!(WbsCode::parse("1.0").is_none());
        assert!(WbsCode::parse("1.a").is_none());
        assert!(WbsCode::parse("A.1").is_none());
    }
}
