//! Similarity scoring primitives over corrected, lowercased strings.
//!
//! All scores are integers in `0..=100`.

use std::collections::{HashMap, HashSet};

use strsim::normalized_levenshtein;

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).clamp(0.0, 100.0) as u8
}

/// Whole-string similarity from normalized Levenshtein distance.
///
/// Symmetric; `ratio(a, a) == 100`, and an empty string scores 0 against
/// any non-empty one.
pub fn ratio(a: &str, b: &str) -> u8 {
    to_score(normalized_levenshtein(a, b))
}

/// Best match of the shorter string against any same-length window of the
/// longer one. Literal containment short-circuits to 100.
///
/// Each window is scored like [`ratio`]. Windows are compared with a
/// bit-parallel edit distance, so the cost is
/// `O(len(longer) * len(shorter) * ceil(len(shorter) / 64))` with no
/// per-window allocation.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    if longer.contains(shorter) {
        return 100;
    }

    let pattern: Vec<char> = shorter.chars().collect();
    let text: Vec<char> = longer.chars().collect();
    let distance = min_window_distance(&pattern, &text);

    to_score(1.0 - distance as f64 / pattern.len() as f64)
}

/// Smallest Levenshtein distance between `pattern` and any window of `text`
/// with the same length (Myers/Hyyrö, blocked over 64-bit words).
///
/// `pattern` must be non-empty and no longer than `text`.
fn min_window_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let words = m.div_ceil(64);
    let last = 1u64 << ((m - 1) % 64);

    let mut masks: HashMap<char, Vec<u64>> = HashMap::new();
    for (i, &c) in pattern.iter().enumerate() {
        masks.entry(c).or_insert_with(|| vec![0; words])[i / 64] |= 1 << (i % 64);
    }
    let absent = vec![0u64; words];
    let text_masks: Vec<&[u64]> = text
        .iter()
        .map(|c| masks.get(c).map_or(absent.as_slice(), Vec::as_slice))
        .collect();

    let mut vp = vec![0u64; words];
    let mut vn = vec![0u64; words];
    let mut best = m;

    for window in text_masks.windows(m) {
        vp.fill(u64::MAX);
        vn.fill(0);
        let mut distance = m;

        for peq in window {
            let mut hp_carry = 1u64;
            let mut hn_carry = 0u64;
            for w in 0..words {
                let x = peq[w] | hn_carry;
                let d0 = ((x & vp[w]).wrapping_add(vp[w]) ^ vp[w]) | x | vn[w];
                let mut hp = vn[w] | !(d0 | vp[w]);
                let mut hn = d0 & vp[w];

                let (hp_in, hn_in) = (hp_carry, hn_carry);
                if w + 1 < words {
                    hp_carry = hp >> 63;
                    hn_carry = hn >> 63;
                } else {
                    hp_carry = u64::from(hp & last != 0);
                    hn_carry = u64::from(hn & last != 0);
                }

                hp = (hp << 1) | hp_in;
                hn = (hn << 1) | hn_in;
                vp[w] = hn | !(d0 | hp);
                vn[w] = hp & d0;
            }
            distance += hp_carry as usize;
            distance -= hn_carry as usize;
        }

        best = best.min(distance);
        if best == 0 {
            break;
        }
    }
    best
}

/// Share of `a`'s whitespace tokens that also occur in `b`.
///
/// Asymmetric: the denominator is always `a`'s token count. Falls back to
/// [`ratio`] when either side has no tokens or the two share none.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return ratio(a, b);
    }

    let shared = tokens_a.intersection(&tokens_b).count();
    if shared == 0 {
        return ratio(a, b);
    }

    ((shared * 100) / tokens_a.len()) as u8
}

/// Percentage of `words` found as literal substrings of `text`.
pub fn word_match_score<S: AsRef<str>>(words: &[S], text: &str) -> u8 {
    if words.is_empty() {
        return 0;
    }
    let found = words
        .iter()
        .filter(|word| text.contains(word.as_ref()))
        .count();
    ((found * 100) / words.len()) as u8
}
