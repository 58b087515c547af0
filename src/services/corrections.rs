//! OCR correction tables and the text normalizer.
//!
//! Recognized label text carries predictable misreadings (`1` for `l`, `rn`
//! for `m`, `0` for `o`). Each field category owns a table of known
//! misreadings mapped to the canonical token. Rules replace whole tokens in a
//! single left-to-right pass: replacement text is never re-scanned, and no
//! table value is also a key, so `correct` is idempotent.

use std::collections::HashMap;
use std::sync::LazyLock;

use strum::{Display, EnumIter, IntoEnumIterator};

/// Semantic category selecting which correction table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CorrectionCategory {
    Brand,
    Type,
    Volume,
    Alcohol,
    Warning,
}

impl CorrectionCategory {
    /// Unit categories see quantities glued to their unit (`355m1`).
    fn splits_quantities(self) -> bool {
        matches!(self, Self::Volume | Self::Alcohol)
    }

    fn table(self) -> &'static CorrectionTable {
        match self {
            Self::Brand => &BRAND_TABLE,
            Self::Type => &TYPE_TABLE,
            Self::Volume => &VOLUME_TABLE,
            Self::Alcohol => &ALCOHOL_TABLE,
            Self::Warning => &WARNING_TABLE,
        }
    }

    fn source_rules(self) -> Vec<(String, &'static str)> {
        match self {
            Self::Brand => {
                let mut rules = literal(BRAND_CORRECTIONS);
                rules.extend(
                    RN_FOR_M_WORDS
                        .iter()
                        .map(|word| (word.replace('m', "rn"), *word)),
                );
                rules
            }
            Self::Type => literal(TYPE_CORRECTIONS),
            Self::Volume => literal(VOLUME_CORRECTIONS),
            Self::Alcohol => literal(ALCOHOL_CORRECTIONS),
            Self::Warning => literal(WARNING_CORRECTIONS),
        }
    }
}

fn literal(rules: &[(&str, &'static str)]) -> Vec<(String, &'static str)> {
    rules
        .iter()
        .map(|(wrong, right)| (wrong.to_string(), *right))
        .collect()
}

// ── Character substitutions ─────────────────────────────────────────────

/// Punctuation that OCR commonly returns in place of a letter.
/// No digit substitutions here; digits belong to net contents and ABV.
const CHAR_SUBSTITUTIONS: &[(char, char)] = &[('|', 'l'), ('!', 'l'), ('$', 's'), ('@', 'a')];

// ── Brand and producer names ────────────────────────────────────────────

const BRAND_CORRECTIONS: &[(&str, &str)] = &[
    // Michelob Ultra
    ("mihelob", "michelob"), ("maheleb", "michelob"), ("mabeleb", "michelob"),
    ("maheiob", "michelob"), ("mahclob", "michelob"), ("mlchelob", "michelob"),
    ("m1chelob", "michelob"), ("miche1ob", "michelob"), ("mictieleb", "michelob"),
    ("miibetob", "michelob"), ("cmlicheelob", "michelob"), ("mitehelob", "michelob"),
    ("micheleb", "michelob"), ("micheiob", "michelob"), ("michelab", "michelob"),
    ("mlcheleb", "michelob"), ("micheloh", "michelob"), ("michclob", "michelob"),
    ("micheieb", "michelob"), ("miehelob", "michelob"), ("micheob", "michelob"),
    ("miheleb", "michelob"),
    ("uttra", "ultra"), ("u1tra", "ultra"), ("uitra", "ultra"), ("ultr4", "ultra"),
    ("uiltra", "ultra"), ("uitr4", "ultra"), ("ulira", "ultra"), ("utra", "ultra"),
    // Budweiser
    ("budwelser", "budweiser"), ("budwe1ser", "budweiser"), ("budwiser", "budweiser"),
    ("budwieser", "budweiser"), ("budwelsr", "budweiser"), ("budweisar", "budweiser"),
    ("budwaser", "budweiser"), ("budw3iser", "budweiser"),
    // Domestic and import beers
    ("c00rs", "coors"), ("co0rs", "coors"), ("coor5", "coors"), ("cooors", "coors"),
    ("mi11er", "miller"), ("miiler", "miller"), ("m1ller", "miller"), ("mlller", "miller"),
    ("c0rona", "corona"), ("cor0na", "corona"), ("carona", "corona"), ("corono", "corona"),
    ("helneken", "heineken"), ("he1neken", "heineken"), ("hieneken", "heineken"),
    ("heiniken", "heineken"), ("heinekn", "heineken"), ("hienken", "heineken"),
    ("ste11a", "stella"), ("stelia", "stella"), ("steila", "stella"),
    ("art0is", "artois"), ("artols", "artois"), ("artios", "artois"),
    ("mode1o", "modelo"), ("modela", "modelo"), ("m0delo", "modelo"),
    ("gulnness", "guinness"), ("gu1nness", "guinness"), ("guiness", "guinness"),
    ("guinnes", "guinness"), ("guinnss", "guinness"), ("guinn3ss", "guinness"),
    ("samue1", "samuel"), ("sarnuel", "samuel"), ("samuei", "samuel"),
    ("pabsi", "pabst"), ("pa8st", "pabst"), ("p4bst", "pabst"),
    ("b1ue", "blue"), ("biue", "blue"), ("bule", "blue"),
    ("rlbbon", "ribbon"), ("r1bbon", "ribbon"), ("ribben", "ribbon"),
    ("natura1", "natural"), ("naturaal", "natural"), ("naturai", "natural"),
    ("1ight", "light"), ("ilght", "light"), ("lighi", "light"), ("l1ght", "light"),
    ("yueng1ing", "yuengling"), ("yuengllng", "yuengling"), ("yuengiing", "yuengling"),
    ("slerra", "sierra"), ("s1erra", "sierra"), ("siarra", "sierra"), ("sterra", "sierra"),
    ("nevado", "nevada"), ("nevad0", "nevada"), ("n3vada", "nevada"),
    // Wine
    ("baref00t", "barefoot"), ("barefool", "barefoot"), ("barefot", "barefoot"),
    ("ye11ow", "yellow"), ("yeilow", "yellow"), ("yel1ow", "yellow"),
    ("tal1", "tail"), ("taii", "tail"),
    ("suiter", "sutter"), ("suttr", "sutter"), ("suttter", "sutter"),
    ("franzla", "franzia"), ("franz1a", "franzia"), ("franza", "franzia"),
    ("w00dbridge", "woodbridge"), ("woodbrldge", "woodbridge"), ("woodbridg", "woodbridge"),
    ("kenda11", "kendall"), ("kendal1", "kendall"), ("kendaii", "kendall"),
    ("jacks0n", "jackson"), ("jckson", "jackson"), ("jacksn", "jackson"),
    ("r0bert", "robert"), ("rob3rt", "robert"), ("robart", "robert"),
    ("m0ndavi", "mondavi"), ("mondav1", "mondavi"), ("mondavl", "mondavi"),
    ("ber1nger", "beringer"), ("beringr", "beringer"), ("beringar", "beringer"),
    ("ga11o", "gallo"), ("galio", "gallo"), ("gall0", "gallo"),
    ("apoth1c", "apothic"), ("ap0thic", "apothic"), ("apothlc", "apothic"),
    ("j0sh", "josh"), ("jash", "josh"),
    ("ce11ars", "cellars"), ("cellar5", "cellars"), ("cellrs", "cellars"),
    ("cr3ma", "crema"), ("crem4", "crema"),
    ("caymu5", "caymus"), ("cayrnus", "caymus"),
    ("si1ver", "silver"), ("sliver", "silver"), ("s1lver", "silver"),
    ("0ak", "oak"), ("oa1k", "oak"),
    ("0pus", "opus"), ("opu5", "opus"),
    ("0ne", "one"), ("on3", "one"),
    // Spirits
    ("danie1s", "daniels"), ("danlels", "daniels"), ("danielss", "daniels"),
    ("dani3ls", "daniels"),
    ("j1m", "jim"), ("jlm", "jim"),
    ("b3am", "beam"), ("bearn", "beam"),
    ("johnn1e", "johnnie"), ("johnnle", "johnnie"),
    ("wa1ker", "walker"), ("waker", "walker"), ("walkar", "walker"),
    ("cr0wn", "crown"), ("crwn", "crown"), ("crawn", "crown"),
    ("roya1", "royal"), ("royai", "royal"), ("rayal", "royal"),
    ("james0n", "jameson"), ("jarneson", "jameson"),
    ("henness1", "hennessy"), ("hennessey", "hennessy"), ("henesy", "hennessy"),
    ("hennssy", "hennessy"), ("hennesey", "hennessy"),
    ("gr3y", "grey"), ("groy", "grey"),
    ("g00se", "goose"), ("go0se", "goose"), ("gose", "goose"),
    ("abso1ut", "absolut"), ("absolui", "absolut"), ("absalut", "absolut"),
    ("smlrnoff", "smirnoff"), ("sm1rnoff", "smirnoff"), ("smirnof", "smirnoff"),
    ("smirn0ff", "smirnoff"),
    ("tit0s", "titos"), ("tltos", "titos"),
    ("patr0n", "patron"), ("pairon", "patron"), ("patrn", "patron"),
    ("d0n", "don"), ("dan", "don"),
    ("ju1io", "julio"), ("jull0", "julio"), ("juli0", "julio"),
    ("casamig0s", "casamigos"), ("casarnigos", "casamigos"), ("casamgos", "casamigos"),
    ("capta1n", "captain"), ("captian", "captain"), ("captln", "captain"),
    ("m0rgan", "morgan"), ("margan", "morgan"), ("morgn", "morgan"),
    ("bacardl", "bacardi"), ("bacard1", "bacardi"), ("barcadi", "bacardi"),
    ("ma1ibu", "malibu"), ("mallbu", "malibu"), ("mal1bu", "malibu"),
    // Producers and bottlers
    ("anhueser", "anheuser"), ("anheusur", "anheuser"), ("anheuer", "anheuser"),
    ("busck", "busch"), ("bu5ch", "busch"),
    ("mi11ercoors", "millercoors"), ("millercoor5", "millercoors"),
    ("diage0", "diageo"), ("d1ageo", "diageo"), ("diagao", "diageo"),
    ("conste11ation", "constellation"), ("constelation", "constellation"),
    ("pern0d", "pernod"), ("pernad", "pernod"),
    ("r1card", "ricard"), ("rlcard", "ricard"),
    ("br0wn", "brown"), ("brwn", "brown"),
    ("f0rman", "forman"), ("forrnan", "forman"),
];

/// Words whose `m` is frequently read as `rn`; each yields a generated rule.
const RN_FOR_M_WORDS: &[&str] = &[
    "michelob", "miller", "beam", "jameson", "morgan", "malibu", "modelo", "merlot",
    "cream", "moscato", "premium", "malt", "forman", "mendocino",
];

// ── Beverage class / type ───────────────────────────────────────────────

const TYPE_CORRECTIONS: &[(&str, &str)] = &[
    // Beer
    ("1ager", "lager"), ("iager", "lager"), ("lag3r", "lager"), ("lagr", "lager"),
    ("pi1sner", "pilsner"), ("pilsnar", "pilsner"), ("plisner", "pilsner"),
    ("a1e", "ale"), ("aie", "ale"),
    ("1pa", "ipa"), ("lpa", "ipa"),
    ("st0ut", "stout"), ("siout", "stout"), ("stoui", "stout"),
    ("p0rter", "porter"), ("portr", "porter"), ("porier", "porter"),
    ("wh3at", "wheat"), ("wheal", "wheat"),
    ("go1d", "gold"), ("g0ld", "gold"), ("goid", "gold"), ("goll", "gold"),
    ("pu re", "pure"), ("pue", "pure"),
    // Wine
    ("cabern3t", "cabernet"), ("cabernei", "cabernet"), ("cabarnet", "cabernet"),
    ("cabernett", "cabernet"),
    ("sauvlgnon", "sauvignon"), ("sauvign0n", "sauvignon"), ("sauvignan", "sauvignon"),
    ("sauv1gnon", "sauvignon"),
    ("chardonn4y", "chardonnay"), ("chardannay", "chardonnay"), ("chardonay", "chardonnay"),
    ("chardonnav", "chardonnay"),
    ("pin0t", "pinot"), ("plnot", "pinot"), ("pnot", "pinot"),
    ("n0ir", "noir"), ("nolr", "noir"),
    ("grig1o", "grigio"), ("grlgio", "grigio"), ("grigl0", "grigio"),
    ("merl0t", "merlot"), ("merloi", "merlot"), ("meriot", "merlot"),
    ("r1esling", "riesling"), ("riesiing", "riesling"), ("riesllng", "riesling"),
    ("moscat0", "moscato"), ("mascato", "moscato"), ("moscoto", "moscato"),
    ("z1nfandel", "zinfandel"), ("zinfande1", "zinfandel"), ("zlnfandel", "zinfandel"),
    ("ma1bec", "malbec"), ("malbac", "malbec"), ("maibec", "malbec"),
    // Spirits
    ("bourb0n", "bourbon"), ("bourban", "bourbon"), ("bourbn", "bourbon"),
    ("wh1skey", "whiskey"), ("whlskey", "whiskey"), ("whisk3y", "whiskey"),
    ("wh1sky", "whisky"), ("whlsky", "whisky"), ("whisk3", "whisky"),
    ("v0dka", "vodka"), ("vodko", "vodka"), ("vdka", "vodka"),
    ("tequ1la", "tequila"), ("tequlia", "tequila"), ("teqila", "tequila"),
    ("rurn", "rum"),
    ("g1n", "gin"), ("gln", "gin"),
    ("br4ndy", "brandy"), ("brandv", "brandy"),
    ("c0gnac", "cognac"), ("cagnac", "cognac"), ("cognc", "cognac"),
    // Descriptors
    ("californ1a", "california"), ("calfornia", "california"), ("californla", "california"),
    ("sing1e", "single"), ("slngle", "single"),
    ("barre1", "barrel"), ("barr3l", "barrel"),
    ("stra1ght", "straight"), ("stralght", "straight"),
    ("organ1c", "organic"), ("organlc", "organic"),
];

// ── Net contents units ──────────────────────────────────────────────────

const VOLUME_CORRECTIONS: &[(&str, &str)] = &[
    ("o2", "oz"), ("02", "oz"), ("o7", "oz"), ("07", "oz"), ("0z", "oz"),
    ("f1", "fl"), ("fi", "fl"),
    ("m1", "ml"), ("mi", "ml"), ("rnl", "ml"),
    ("1iter", "liter"), ("llter", "liter"), ("litre", "liter"), ("l1ter", "liter"),
    ("p1nt", "pint"), ("p1n1", "pint"), ("plnt", "pint"),
];

// ── Alcohol statement vocabulary ────────────────────────────────────────

const ALCOHOL_CORRECTIONS: &[(&str, &str)] = &[
    ("a1c", "alc"), ("aic", "alc"), ("alcc", "alc"), ("alg", "alc"),
    ("vo1", "vol"), ("voi", "vol"), ("v0l", "vol"), ("voll", "vol"),
    // "ALC DL" is a common misreading of "ALC VOL"
    ("dl", "vol"),
    ("a8v", "abv"), ("abvv", "abv"),
    ("pr00f", "proof"), ("prooof", "proof"), ("pro0f", "proof"),
];

// ── Government warning vocabulary ───────────────────────────────────────

const WARNING_CORRECTIONS: &[(&str, &str)] = &[
    ("covernment", "government"), ("qovernment", "government"), ("govemment", "government"),
    ("governmentwarning", "government warning"),
    ("surgeqn", "surgeon"), ("qeneral", "general"),
    ("surgeongeneral", "surgeon general"),
    ("wornen", "women"), ("wom3n", "women"), ("wamen", "women"),
    ("drlnk", "drink"), ("dr1nk", "drink"), ("drnk", "drink"),
    ("aleoholic", "alcoholic"),
    ("pregnacy", "pregnancy"),
    ("blrth", "birth"), ("defecl", "defect"),
    ("consumpt1on", "consumption"), ("consumpti0n", "consumption"),
    ("consumpton", "consumption"),
    ("lmpair", "impair"), ("1mpair", "impair"), ("impalr", "impair"),
    ("ab1lity", "ability"), ("abiiity", "ability"), ("abilty", "ability"),
    ("dr1ve", "drive"), ("drlve", "drive"), ("driv3", "drive"),
    ("machlnery", "machinery"), ("mach1nery", "machinery"), ("machnery", "machinery"),
    ("hea1th", "health"),
];

static BRAND_TABLE: LazyLock<CorrectionTable> =
    LazyLock::new(|| CorrectionTable::build(CorrectionCategory::Brand));
static TYPE_TABLE: LazyLock<CorrectionTable> =
    LazyLock::new(|| CorrectionTable::build(CorrectionCategory::Type));
static VOLUME_TABLE: LazyLock<CorrectionTable> =
    LazyLock::new(|| CorrectionTable::build(CorrectionCategory::Volume));
static ALCOHOL_TABLE: LazyLock<CorrectionTable> =
    LazyLock::new(|| CorrectionTable::build(CorrectionCategory::Alcohol));
static WARNING_TABLE: LazyLock<CorrectionTable> =
    LazyLock::new(|| CorrectionTable::build(CorrectionCategory::Warning));

/// One `(category, wrong, correct)` entry, as exposed for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRule {
    pub category: CorrectionCategory,
    pub wrong: String,
    pub correct: &'static str,
}

#[derive(Debug)]
struct TokenRule {
    /// Key tokens after the first one; empty for single-token rules.
    rest: Vec<String>,
    value: &'static str,
}

/// Compiled table: rules indexed by their first key token.
#[derive(Debug)]
struct CorrectionTable {
    by_first_token: HashMap<String, Vec<TokenRule>>,
    rules: Vec<CorrectionRule>,
}

impl CorrectionTable {
    fn build(category: CorrectionCategory) -> Self {
        let mut by_first_token: HashMap<String, Vec<TokenRule>> = HashMap::new();
        let mut rules = Vec::new();

        for (wrong, value) in category.source_rules() {
            let mut tokens = wrong.split_whitespace().map(str::to_string);
            let Some(first) = tokens.next() else {
                continue;
            };
            let rest: Vec<String> = tokens.collect();

            let candidates = by_first_token.entry(first).or_default();
            // First declaration of a key wins.
            if candidates.iter().any(|rule| rule.rest == rest) {
                continue;
            }
            candidates.push(TokenRule { rest, value });
            rules.push(CorrectionRule {
                category,
                wrong,
                correct: value,
            });
        }

        // Most tokens first, then longest key.
        for candidates in by_first_token.values_mut() {
            candidates.sort_by(|a, b| {
                b.rest.len().cmp(&a.rest.len()).then_with(|| {
                    let len = |r: &TokenRule| r.rest.iter().map(String::len).sum::<usize>();
                    len(b).cmp(&len(a))
                })
            });
        }

        Self {
            by_first_token,
            rules,
        }
    }

    fn lookup(&self, token: &str) -> Option<&'static str> {
        self.by_first_token
            .get(token)?
            .iter()
            .find(|rule| rule.rest.is_empty())
            .map(|rule| rule.value)
    }

    /// Single left-to-right pass over alphanumeric tokens.
    fn apply(&self, text: &str, splits_quantities: bool) -> String {
        let segments = segments(text);
        let mut out = String::with_capacity(text.len());
        let mut i = 0;

        while i < segments.len() {
            let (segment, is_word) = segments[i];
            if !is_word {
                out.push_str(segment);
                i += 1;
                continue;
            }

            // Fraction digits after `.` or `,` are never part of a key.
            let after_decimal_point = i > 0 && matches!(segments[i - 1].0, "." | ",");
            if after_decimal_point && segment.starts_with(|c: char| c.is_ascii_digit()) {
                if splits_quantities {
                    self.push_split(&mut out, segment);
                } else {
                    out.push_str(segment);
                }
                i += 1;
                continue;
            }

            if let Some((value, consumed)) = self.match_phrase(&segments, i) {
                out.push_str(value);
                i += consumed;
                continue;
            }

            if let Some(value) = self.lookup(segment) {
                out.push_str(value);
            } else if splits_quantities {
                self.push_split(&mut out, segment);
            } else {
                out.push_str(segment);
            }
            i += 1;
        }

        out
    }

    /// Keep a leading digit run and correct only the unit glued after it.
    fn push_split(&self, out: &mut String, segment: &str) {
        let (digits, unit) = split_leading_digits(segment);
        out.push_str(digits);
        match self.lookup(unit) {
            Some(value) if !digits.is_empty() => out.push_str(value),
            _ => out.push_str(unit),
        }
    }

    /// Multi-token rules: key tokens separated by single spaces.
    fn match_phrase(&self, segments: &[(&str, bool)], start: usize) -> Option<(&'static str, usize)> {
        let candidates = self.by_first_token.get(segments[start].0)?;

        candidates
            .iter()
            .filter(|rule| !rule.rest.is_empty())
            .find(|rule| {
                rule.rest.iter().enumerate().all(|(n, key)| {
                    let sep = start + 2 * n + 1;
                    matches!(segments.get(sep), Some((" ", false)))
                        && matches!(segments.get(sep + 1), Some((word, true)) if word == key)
                })
            })
            .map(|rule| (rule.value, 2 * rule.rest.len() + 1))
    }
}

/// Split text into alternating runs of alphanumeric and other characters.
fn segments(text: &str) -> Vec<(&str, bool)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_word = ch.is_alphanumeric();
        match current {
            Some(kind) if kind == is_word => {}
            Some(kind) => {
                out.push((&text[start..idx], kind));
                start = idx;
                current = Some(is_word);
            }
            None => current = Some(is_word),
        }
    }
    if let Some(kind) = current {
        out.push((&text[start..], kind));
    }
    out
}

fn split_leading_digits(token: &str) -> (&str, &str) {
    let idx = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    token.split_at(idx)
}

/// Lowercase and collapse whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn substitute_chars(text: &str) -> String {
    text.chars()
        .map(|c| {
            CHAR_SUBSTITUTIONS
                .iter()
                .find(|(wrong, _)| *wrong == c)
                .map(|(_, right)| *right)
                .unwrap_or(c)
        })
        .collect()
}

/// Normalize `text` and apply the correction table for `category`.
pub fn correct(text: &str, category: CorrectionCategory) -> String {
    let prepared = substitute_chars(&normalize(text));
    category
        .table()
        .apply(&prepared, category.splits_quantities())
}

/// `correct` for a category, or plain `normalize` when none applies.
pub fn prepare(text: &str, category: Option<CorrectionCategory>) -> String {
    match category {
        Some(category) => correct(text, category),
        None => normalize(text),
    }
}

/// All rules of one category, in declaration order.
pub fn rules(category: CorrectionCategory) -> &'static [CorrectionRule] {
    &category.table().rules
}

/// Total number of loaded correction rules across every category.
pub fn rule_count() -> usize {
    CorrectionCategory::iter()
        .map(|category| rules(category).len())
        .sum()
}
