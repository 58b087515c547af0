//! Per-field verification strategies.
//!
//! Every strategy resolves to a [`Verdict`]; none of them fail past the
//! caller, whatever the input looks like.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::services::corrections::{self, CorrectionCategory};
use crate::services::similarity::{partial_ratio, token_set_ratio, word_match_score};
use crate::services::validation::VerificationError;

/// Pass/fail decision for one field with a 0-100 score and a readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    pub score: u8,
    pub details: String,
}

impl Verdict {
    pub fn pass(score: u8, details: impl Into<String>) -> Self {
        Self {
            passed: true,
            score: score.min(100),
            details: details.into(),
        }
    }

    pub fn fail(score: u8, details: impl Into<String>) -> Self {
        Self {
            passed: false,
            score: score.min(100),
            details: details.into(),
        }
    }
}

/// Thresholds for the fuzzy containment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyPolicy {
    /// Human-readable field label used in details ("Brand", "Type").
    pub label: &'static str,
    pub threshold: u8,
    /// Words shorter than this are ignored when counting found words.
    pub min_word_len: usize,
}

// ── Fuzzy text fields (brand, class/type, producer) ─────────────────────

/// Corrected exact containment, then per-word containment, then the best of
/// partial and token-set similarity.
pub fn verify_fuzzy_containment(
    input: &str,
    extracted_text: &str,
    category: Option<CorrectionCategory>,
    policy: &FuzzyPolicy,
) -> Verdict {
    if extracted_text.trim().is_empty() {
        return Verdict::fail(0, VerificationError::EmptyExtraction.to_string());
    }

    let input = corrections::prepare(input, category);
    let text = corrections::prepare(extracted_text, category);

    if text.contains(&input) {
        return Verdict::pass(100, "Exact match found");
    }

    let words: Vec<&str> = input
        .split_whitespace()
        .filter(|w| w.chars().count() >= policy.min_word_len)
        .collect();
    if !words.is_empty() {
        let word_score = word_match_score(&words, &text);
        if word_score >= 100 {
            return Verdict::pass(
                100,
                format!("All {} words found", policy.label.to_lowercase()),
            );
        }
        if word_score >= policy.threshold {
            return Verdict::pass(
                word_score,
                format!("{} match ({}% words found)", policy.label, word_score),
            );
        }
    }

    let best = partial_ratio(&input, &text).max(token_set_ratio(&input, &text));
    if best >= policy.threshold {
        Verdict::pass(best, format!("Fuzzy match ({}% similarity)", best))
    } else {
        Verdict::fail(
            best,
            format!("{} not found ({}% similarity)", policy.label, best),
        )
    }
}

// ── Location fields (city, country) ─────────────────────────────────────

/// Plain containment, then partial similarity. No correction table applies.
pub fn verify_location(input: &str, extracted_text: &str, label: &str, threshold: u8) -> Verdict {
    if extracted_text.trim().is_empty() {
        return Verdict::fail(0, VerificationError::EmptyExtraction.to_string());
    }

    let input = corrections::normalize(input);
    let text = corrections::normalize(extracted_text);

    if text.contains(&input) {
        return Verdict::pass(100, "Exact match found");
    }

    let score = partial_ratio(&input, &text);
    if score >= threshold {
        Verdict::pass(score, format!("Match found ({}% similarity)", score))
    } else {
        Verdict::fail(score, format!("{} not found ({}% similarity)", label, score))
    }
}

// ── Strict numeric fields ───────────────────────────────────────────────

/// A decimal number: `1,750` style thousands, `12.5` or `12,5` decimals, a
/// bare `.75`, or a trailing point (`12.`).
const NUMBER: &str = r"([0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?|[0-9]+(?:[.,][0-9]+)?\.?|[.,][0-9]+)";

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBER).expect("number pattern is valid"));

static THOUSANDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?$").expect("thousands pattern is valid")
});

static VOLUME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\s*fl\.?\s*oz",
        r"\s*floz",
        r"\s*ml",
        r"\s*l\b",
        r"\s*liter",
        r"\s*oz",
        r"\s*pint",
    ]
    .iter()
    .map(|unit| Regex::new(&format!("{NUMBER}{unit}")).expect("volume pattern is valid"))
    .collect()
});

static ALCOHOL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"{NUMBER}\s*%\s*alc"),
        format!(r"{NUMBER}\s*%\s*vol"),
        format!(r"{NUMBER}\s*%\s*abv"),
        format!(r"alc\.?/?vol\.?\s*{NUMBER}\s*%"),
        format!(r"alc\.?\s*/?\s*{NUMBER}\s*%"),
        format!(r"{NUMBER}\s*%\s*by\s*vol"),
        format!(r"alcohol\s*:?\s*{NUMBER}\s*%"),
        format!(r"{NUMBER}\s*%\s*alcohol"),
        format!(r"{NUMBER}\s*alc/vol"),
        format!(r"{NUMBER}\s*alc\s*/\s*vol"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("alcohol pattern is valid"))
    .collect()
});

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{NUMBER}\s*%")).expect("percent pattern is valid"));

/// Numeric value of a captured literal. A comma is a thousands separator in
/// `1,750` and a decimal separator otherwise.
fn number_value(literal: &str) -> Option<f64> {
    let canonical = if THOUSANDS_RE.is_match(literal) {
        literal.replace(',', "")
    } else {
        literal.replace(',', ".")
    };
    canonical.trim_end_matches('.').parse::<f64>().ok()
}

/// True when the match at `start` is the tail of a longer number, as `750`
/// inside `1,750` or `5` inside `12.5`.
fn starts_inside_number(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    match before.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.' | ',') => before.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// First-group captures of `pattern` that start on a number boundary.
fn numbers<'a>(pattern: &'a Regex, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter(move |m| !starts_inside_number(text, m.start()))
        .map(|m| m.as_str())
}

/// First decimal number in `text`, with its literal spelling.
fn parse_number(text: &str) -> Option<(String, f64)> {
    numbers(&NUMBER_RE, text)
        .find_map(|literal| number_value(literal).map(|value| (literal.to_string(), value)))
}

/// Distinct candidates across every pattern, in discovery order.
fn collect_candidates<'a>(patterns: impl IntoIterator<Item = &'a Regex>, text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for pattern in patterns {
        for literal in numbers(pattern, text) {
            if !found.iter().any(|f| f == literal) {
                found.push(literal.to_string());
            }
        }
    }
    found
}

fn find_equal(candidates: &[String], expected: f64) -> Option<&String> {
    candidates
        .iter()
        .find(|c| number_value(c).is_some_and(|v| v == expected))
}

/// Net contents must match a labelled volume exactly; there is no fuzzy
/// fallback, so 750 mL never certifies a label printed with 751 mL.
pub fn verify_net_contents(input: &str, extracted_text: &str) -> Verdict {
    if extracted_text.trim().is_empty() {
        return Verdict::fail(0, VerificationError::EmptyExtraction.to_string());
    }

    let input = corrections::correct(input, CorrectionCategory::Volume);
    let Some((input_literal, expected)) = parse_number(&input) else {
        return Verdict::fail(
            0,
            VerificationError::UnparsableNumeric { quantity: "volume" }.to_string(),
        );
    };

    let text = corrections::correct(extracted_text, CorrectionCategory::Volume);
    let candidates = collect_candidates(VOLUME_PATTERNS.iter(), &text);

    if let Some(found) = find_equal(&candidates, expected) {
        return Verdict::pass(100, format!("Exact volume match: {}", found));
    }

    if candidates.is_empty() {
        Verdict::fail(0, "No volume found in text")
    } else {
        Verdict::fail(
            0,
            format!(
                "No match - expected {}, found: {}",
                input_literal,
                candidates.join(", ")
            ),
        )
    }
}

/// Alcohol content must match a percentage stated near an alcohol keyword.
pub fn verify_alcohol_content(input: &str, extracted_text: &str) -> Verdict {
    if extracted_text.trim().is_empty() {
        return Verdict::fail(0, VerificationError::EmptyExtraction.to_string());
    }

    let Some((input_literal, expected)) = parse_number(input) else {
        return Verdict::fail(
            0,
            VerificationError::UnparsableNumeric {
                quantity: "alcohol content",
            }
            .to_string(),
        );
    };

    let text = corrections::correct(extracted_text, CorrectionCategory::Alcohol);
    let mut candidates = collect_candidates(ALCOHOL_PATTERNS.iter(), &text);

    // Bare percentages count only when the text mentions alcohol at all.
    if candidates.is_empty() && (text.contains("alc") || text.contains("vol")) {
        candidates = collect_candidates(std::iter::once(&*PERCENT_RE), &text);
    }

    if let Some(found) = find_equal(&candidates, expected) {
        return Verdict::pass(100, format!("Exact match: {}%", found));
    }

    if candidates.is_empty() {
        Verdict::fail(0, "No alcohol percentage found in text")
    } else {
        Verdict::fail(
            0,
            format!(
                "No match - expected {}%, found: {}%",
                input_literal,
                candidates.join("%, ")
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRAND: FuzzyPolicy = FuzzyPolicy {
        label: "Brand",
        threshold: 80,
        min_word_len: 2,
    };

    const TYPE: FuzzyPolicy = FuzzyPolicy {
        label: "Type",
        threshold: 75,
        min_word_len: 3,
    };

    #[test]
    fn test_brand_exact_after_correction() {
        let verdict = verify_fuzzy_containment(
            "Michelob Ultra",
            "MAHELEB UTTRA Superior Light Beer",
            Some(CorrectionCategory::Brand),
            &BRAND,
        );
        assert!(verdict.passed);
        assert!(verdict.score >= BRAND.threshold);
    }

    #[test]
    fn test_brand_words_scattered() {
        let verdict = verify_fuzzy_containment(
            "Stone Creek Vineyards",
            "VINEYARDS est. 1998 STONE ... CREEK",
            Some(CorrectionCategory::Brand),
            &BRAND,
        );
        assert!(verdict.passed);
        assert_eq!(verdict.score, 100);
        assert_eq!(verdict.details, "All brand words found");
    }

    #[test]
    fn test_brand_fuzzy_fallback() {
        let verdict = verify_fuzzy_containment(
            "Kirkland",
            "KIRKLAMD SIGNATURE",
            Some(CorrectionCategory::Brand),
            &BRAND,
        );
        assert!(verdict.passed, "{verdict:?}");
        assert_eq!(verdict.score, 87);
    }

    #[test]
    fn test_brand_not_found() {
        let verdict = verify_fuzzy_containment(
            "Heineken",
            "CORONA EXTRA",
            Some(CorrectionCategory::Brand),
            &BRAND,
        );
        assert!(!verdict.passed);
        assert!(verdict.details.starts_with("Brand not found"));
    }

    #[test]
    fn test_type_corrected_words() {
        let verdict = verify_fuzzy_containment(
            "California Cabernet Sauvignon",
            "CALIFORN1A CABERNEI SAUVLGNON 2019",
            Some(CorrectionCategory::Type),
            &TYPE,
        );
        assert!(verdict.passed);
        assert_eq!(verdict.score, 100);
    }

    #[test]
    fn test_empty_text_fails() {
        let verdict =
            verify_fuzzy_containment("Gallo", "  ", Some(CorrectionCategory::Brand), &BRAND);
        assert!(!verdict.passed);
        assert_eq!(verdict.score, 0);
    }

    #[test]
    fn test_location_match() {
        assert!(verify_location("Napa", "Bottled in NAPA, CA", "City", 70).passed);
        let miss = verify_location("Portugal", "PRODUCT OF USA", "Country", 70);
        assert!(!miss.passed);
        assert!(miss.details.starts_with("Country not found"));
    }

    #[test]
    fn test_net_contents_strict_mismatch() {
        let verdict = verify_net_contents("750ml", "CABERNET 751 ML 13.5% ALC/VOL");
        assert!(!verdict.passed);
        assert_eq!(verdict.score, 0);
        assert!(verdict.details.contains("751"));
    }

    #[test]
    fn test_net_contents_match_variants() {
        assert!(verify_net_contents("12 fl oz", "12 FL. OZ").passed);
        assert!(verify_net_contents("12 fl oz", "12 F1 02").passed);
        assert!(verify_net_contents("355 mL", "355M1 CAN").passed);
        assert!(verify_net_contents("1.75 L", "1.75L BOTTLE").passed);
        assert!(verify_net_contents("1 pint", "ONE 1 PINT").passed);
    }

    #[test]
    fn test_net_contents_ignores_tail_of_larger_number() {
        let verdict = verify_net_contents("750 ml", "1,750 ML MAGNUM");
        assert!(!verdict.passed);
        assert_eq!(verdict.details, "No match - expected 750, found: 1,750");

        assert!(verify_net_contents("1750 ml", "1,750 ML MAGNUM").passed);
        assert!(!verify_net_contents("5 ml", "12.5 ML").passed);
    }

    #[test]
    fn test_net_contents_leading_point_decimal() {
        let verdict = verify_net_contents(".75 L", "75 ML MINI");
        assert!(!verdict.passed);
        assert_eq!(verdict.details, "No match - expected .75, found: 75");

        assert!(verify_net_contents(".75 L", "0.75 L BOTTLE").passed);
    }

    #[test]
    fn test_net_contents_float_equality() {
        assert!(verify_net_contents("750.0 ml", "750 ML").passed);
    }

    #[test]
    fn test_net_contents_unparsable_input() {
        let verdict = verify_net_contents("seven fifty", "750 ML");
        assert!(!verdict.passed);
        assert_eq!(verdict.details, "Could not parse input volume");
    }

    #[test]
    fn test_net_contents_no_volume_in_text() {
        let verdict = verify_net_contents("750 ml", "RED WINE");
        assert_eq!(verdict.details, "No volume found in text");
    }

    #[test]
    fn test_alcohol_float_equivalence() {
        let verdict = verify_alcohol_content("14.0%", "ALC 14% BY VOL");
        assert!(verdict.passed, "{verdict:?}");
        assert_eq!(verdict.score, 100);
    }

    #[test]
    fn test_alcohol_ocr_keywords() {
        assert!(verify_alcohol_content("5%", "5% A1C/VO1").passed);
        assert!(verify_alcohol_content("13.5", "ALC DL 13.5%").passed);
        assert!(verify_alcohol_content("40%", "ALCOHOL: 40%").passed);
    }

    #[test]
    fn test_alcohol_decimal_comma() {
        let verdict = verify_alcohol_content("5%", "ALC 12,5% VOL");
        assert!(!verdict.passed);
        assert_eq!(verdict.details, "No match - expected 5%, found: 12,5%");

        assert!(verify_alcohol_content("12.5%", "ALC 12,5% VOL").passed);
    }

    #[test]
    fn test_alcohol_mismatch_lists_candidates() {
        let verdict = verify_alcohol_content("5%", "4.2% ALC/VOL");
        assert!(!verdict.passed);
        assert_eq!(verdict.details, "No match - expected 5%, found: 4.2%");
    }

    #[test]
    fn test_alcohol_bare_percentage_needs_keyword() {
        assert!(!verify_alcohol_content("20%", "SAVE 20% TODAY").passed);
        assert!(verify_alcohol_content("20%", "20% (VOL)").passed);
    }

    #[test]
    fn test_alcohol_unparsable_input() {
        let verdict = verify_alcohol_content("strong", "5% ALC");
        assert_eq!(verdict.details, "Could not parse input alcohol content");
    }
}
