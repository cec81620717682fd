//! Equipment categorization via ordered first-match-wins rules.
//!
//! Each category `01`..`10` carries an ordered list of prefix/pattern
//! rules; lists are evaluated in category order and the first matching
//! rule wins. Rule order is semantically load-bearing and must not be
//! normalized into a map: some prefixes are ambiguous (`BCR` names both
//! a breaker control relay and a battery charger rectifier) and the
//! earlier list deliberately wins. Identifiers nothing matches fall into
//! `99` (Unrecognised Equipment).

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Category;
use crate::model::equipment::normalize_equipment_number;

/// One classification rule: a literal prefix or an anchored pattern.
enum Matcher {
    Prefix(&'static str),
    Pattern(Regex),
}

impl Matcher {
    fn matches(&self, cleaned: &str) -> bool {
        match self {
            Matcher::Prefix(p) => cleaned.starts_with(p),
            Matcher::Pattern(re) => re.is_match(cleaned),
        }
    }
}

fn pattern(re: &str) -> Matcher {
    Matcher::Pattern(Regex::new(re).expect("classifier rule pattern"))
}

/// The full dispatch table, in evaluation order.
///
/// Do not re-order for tidiness: evaluation order resolves the
/// ambiguous prefixes (`BCR` in 03 vs 04, `ACB` in 02 vs the `AC`
/// pattern in 10).
static RULES: LazyLock<Vec<(Category, Vec<Matcher>)>> = LazyLock::new(|| {
    use Matcher::Prefix;
    vec![
        (
            Category::ALL[0], // 01 HV Switchgear
            vec![pattern(r"^H\d"), Prefix("CB"), Prefix("SG"), Prefix("RMU")],
        ),
        (
            Category::ALL[1], // 02 LV Switchgear & Distribution
            vec![
                Prefix("UH"),
                Prefix("DB"),
                Prefix("MCC"),
                Prefix("ACB"),
                Prefix("LV"),
            ],
        ),
        (
            Category::ALL[2], // 03 Protection & Control
            vec![
                Prefix("BCR"), // breaker control relay; shadows 04's charger
                pattern(r"^F\d"),
                Prefix("PR"),
                Prefix("RLY"),
                pattern(r"^K\d"),
            ],
        ),
        (
            Category::ALL[3], // 04 DC Systems & UPS
            vec![
                Prefix("GB"),
                Prefix("UPS"),
                Prefix("BCR"), // battery charger rectifier; never reached
                pattern(r"^CH\d"),
                Prefix("DC"),
            ],
        ),
        (
            Category::ALL[4], // 05 Transformers
            vec![pattern(r"^T\d"), Prefix("TX"), Prefix("NER"), Prefix("NECR")],
        ),
        (
            Category::ALL[5], // 06 Cables & Reticulation
            vec![pattern(r"^W\d"), Prefix("CBL"), Prefix("BUS")],
        ),
        (
            Category::ALL[6], // 07 Earthing & Lightning Protection
            vec![pattern(r"^E\d"), Prefix("EG"), Prefix("LPS"), Prefix("MEB")],
        ),
        (
            Category::ALL[7], // 08 Metering & Instrumentation
            vec![
                pattern(r"^CT\d"),
                pattern(r"^VT\d"),
                Prefix("MTR"),
                Prefix("PQ"),
                pattern(r"^M\d"),
            ],
        ),
        (
            Category::ALL[8], // 09 Control Systems & Communications
            vec![
                Prefix("RTU"),
                Prefix("PLC"),
                Prefix("SCD"),
                Prefix("NTW"),
                Prefix("GW"),
            ],
        ),
        (
            Category::ALL[9], // 10 Building Services
            vec![
                pattern(r"^AC\d"),
                Prefix("HVAC"),
                pattern(r"^LP\d"),
                Prefix("SSL"),
                Prefix("FD"),
            ],
        ),
    ]
});

/// Classify an equipment identifier into its category bucket.
///
/// The leading `+`/`-` polarity marker is stripped before matching.
pub fn classify(equipment_number: &str) -> Category {
    let cleaned = normalize_equipment_number(equipment_number);
    for (category, matchers) in RULES.iter() {
        if matchers.iter().any(|m| m.matches(cleaned)) {
            tracing::debug!(equipment = equipment_number, category = category.id, "classified");
            return *category;
        }
    }
    tracing::debug!(equipment = equipment_number, "no rule matched; unrecognised");
    Category::UNRECOGNISED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+UH101", "02")]
    #[case("T5", "05")]
    #[case("ZZZ999", "99")]
    #[case("H01", "01")]
    #[case("CB12", "01")]
    #[case("-DB04", "02")]
    #[case("F87", "03")]
    #[case("K301", "03")]
    #[case("GB01", "04")]
    #[case("UPS2", "04")]
    #[case("TX1", "05")]
    #[case("W1045", "06")]
    #[case("E01", "07")]
    #[case("CT101", "08")]
    #[case("MTR3", "08")]
    #[case("RTU01", "09")]
    #[case("AC101", "10")]
    #[case("LP2", "10")]
    fn classify_cases(#[case] number: &str, #[case] expected: &str) {
        assert_eq!(classify(number).id, expected);
    }

    #[test]
    fn test_bcr_ambiguity_resolved_by_order() {
        // BCR appears in both the 03 and 04 lists; 03 is evaluated first.
        assert_eq!(classify("BCR01").id, "03");
        assert_eq!(classify("+BCR01").id, "03");
    }

    #[test]
    fn test_acb_shadows_ac_pattern() {
        // ACB (air circuit breaker) lands in 02 before 10's ^AC\d rule
        // could ever see it.
        assert_eq!(classify("ACB1").id, "02");
        assert_eq!(classify("AC1").id, "10");
    }

    #[test]
    fn test_polarity_stripped_before_matching() {
        assert_eq!(classify("-T12").id, "05");
        assert_eq!(classify("+GB7").id, "04");
    }

    #[test]
    fn test_prefix_alone_is_not_enough_for_patterns() {
        // ^T\d requires a digit after the T; "TLC" is unrecognised.
        assert_eq!(classify("TLC9").id, "99");
    }
}
