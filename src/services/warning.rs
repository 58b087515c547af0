//! Government health warning check (27 CFR 16.21).
//!
//! The warning is printed in a standard font, so instead of general fuzzy
//! matching the text is reduced to letters and digits and checked for a fixed
//! set of required phrase fragments, each with curated OCR variants.

use crate::services::field_verifiers::Verdict;
use crate::services::validation::VerificationError;

/// Canonical statutory warning text.
pub const GOVERNMENT_WARNING: &str = "GOVERNMENT WARNING: (1) According to the Surgeon General, \
women should not drink alcoholic beverages during pregnancy because of the risk of birth \
defects. (2) Consumption of alcoholic beverages impairs your ability to drive a car or operate \
machinery, and may cause health problems.";

/// Minimum keyword coverage (percent) once the header is present.
pub const WARNING_COVERAGE_THRESHOLD: u8 = 66;

const HEADER: &str = "government warning";

/// Required fragments and the misreadings accepted for each.
const REQUIRED_KEYWORDS: &[(&str, &[&str])] = &[
    (
        HEADER,
        &["covernment warning", "qovernment warning", "govemment warning"],
    ),
    (
        "surgeon general",
        &["surgeqn general", "surgeon qeneral", "surgeongenera", "surgeon genera"],
    ),
    ("women", &["wornen", "wom3n", "wamen"]),
    ("drink", &["drlnk", "dr1nk", "drnk"]),
    ("alcoholic beverages", &["alcoholic beverag", "aleoholic beverages"]),
    ("pregnancy", &["pregnan", "preg nan", "prenant", "pregnacy"]),
    ("birth defect", &["blrth defect", "birth defecl", "birth detect"]),
    ("consumption", &["consumpt1on", "consumpti0n", "consumpton"]),
    ("impair", &["lmpair", "1mpair", "impalr"]),
    ("ability", &["ab1lity", "abiiity", "abilty"]),
    ("drive", &["dr1ve", "drlve", "driv3"]),
    ("machinery", &["machlnery", "mach1nery", "machin", "machnery"]),
    ("health problem", &["health prob", "hea1th problem"]),
];

fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lowercase, drop everything but ASCII letters, digits and spaces.
fn clean(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword tally over the cleaned text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningCoverage {
    pub found: Vec<&'static str>,
    pub missing: Vec<&'static str>,
}

impl WarningCoverage {
    pub fn has_header(&self) -> bool {
        self.found.contains(&HEADER)
    }

    /// Found fragments as a truncated percentage of all required fragments.
    pub fn score(&self) -> u8 {
        let total = self.found.len() + self.missing.len();
        if total == 0 {
            return 0;
        }
        ((self.found.len() * 100) / total) as u8
    }
}

/// Tally which required fragments appear, ignoring spaces on both sides.
pub fn keyword_coverage(extracted_text: &str) -> WarningCoverage {
    let text = squash(&clean(extracted_text));
    let mut coverage = WarningCoverage::default();

    for (keyword, variants) in REQUIRED_KEYWORDS {
        let present = std::iter::once(keyword)
            .chain(variants.iter())
            .any(|fragment| text.contains(&squash(fragment)));
        if present {
            coverage.found.push(*keyword);
        } else {
            coverage.missing.push(*keyword);
        }
    }
    coverage
}

/// Pass requires the header AND coverage at or above `threshold`.
pub fn verify_government_warning(extracted_text: &str, threshold: u8) -> Verdict {
    if extracted_text.trim().is_empty() {
        return Verdict::fail(0, VerificationError::EmptyExtraction.to_string());
    }

    let coverage = keyword_coverage(extracted_text);
    let score = coverage.score();
    let total = REQUIRED_KEYWORDS.len();

    if !coverage.has_header() {
        return Verdict::fail(score, "GOVERNMENT WARNING header not found");
    }

    if score >= threshold {
        Verdict::pass(
            score,
            format!(
                "Government warning verified ({}/{} keywords)",
                coverage.found.len(),
                total
            ),
        )
    } else {
        let missing: Vec<&str> = coverage.missing.iter().take(3).copied().collect();
        Verdict::fail(
            score,
            format!(
                "Warning incomplete ({}% - missing: {}...)",
                score,
                missing.join(", ")
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_warning_full_coverage() {
        let verdict = verify_government_warning(GOVERNMENT_WARNING, WARNING_COVERAGE_THRESHOLD);
        assert!(verdict.passed);
        assert_eq!(verdict.score, 100);
        assert_eq!(verdict.details, "Government warning verified (13/13 keywords)");
    }

    #[test]
    fn test_variant_spelling_still_passes() {
        let text = GOVERNMENT_WARNING.replace("birth defects", "blrth defects");
        let verdict = verify_government_warning(&text, WARNING_COVERAGE_THRESHOLD);
        assert!(verdict.passed);
        assert_eq!(verdict.score, 100);
    }

    #[test]
    fn test_missing_header_always_fails() {
        let text = GOVERNMENT_WARNING.replace("GOVERNMENT WARNING:", "");
        let verdict = verify_government_warning(&text, 0);
        assert!(!verdict.passed);
        assert_eq!(verdict.score, 92);
        assert_eq!(verdict.details, "GOVERNMENT WARNING header not found");
    }

    #[test]
    fn test_merged_words_and_punctuation() {
        let text = "GOVERNMENTWARNING:(1)ACCORDING TO THE SURGEON-GENERAL, WOMEN SHOULD NOT \
                    DRINK ALCOHOLIC BEVERAGES DURING PREGNANCY";
        let coverage = keyword_coverage(text);
        assert!(coverage.has_header());
        assert!(coverage.found.contains(&"surgeon general"));
        assert_eq!(coverage.found.len(), 6);
    }

    #[test]
    fn test_incomplete_warning_lists_missing() {
        let verdict = verify_government_warning(
            "GOVERNMENT WARNING: according to the surgeon general",
            WARNING_COVERAGE_THRESHOLD,
        );
        assert!(!verdict.passed);
        assert_eq!(verdict.score, 15);
        assert_eq!(
            verdict.details,
            "Warning incomplete (15% - missing: women, drink, alcoholic beverages...)"
        );
    }
}
