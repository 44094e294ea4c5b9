//! String helpers shared by generation, SKU derivation, and validation.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static PLAIN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?$").expect("valid plain number regex"));

/// Accented Latin letters (Vietnamese and common European) grouped by the
/// ASCII letter they fold to. Lowercase only; case is restored by the caller.
const FOLDS: &[(char, &str)] = &[
    ('a', "àáảãạăằắẳẵặâầấẩẫậäåāąǎ"),
    ('e', "èéẻẽẹêềếểễệëēėęě"),
    ('i', "ìíỉĩịîïīįı"),
    ('o', "òóỏõọôồốổỗộơờớởỡợöøōő"),
    ('u', "ùúủũụưừứửữựûüūůűų"),
    ('y', "ỳýỷỹỵÿ"),
    ('d', "đď"),
    ('c', "çćčĉċ"),
    ('n', "ñńňņ"),
    ('s', "śšşș"),
    ('z', "źżž"),
    ('g', "ğ"),
    ('l', "łľĺ"),
    ('r', "řŕ"),
    ('t', "ťţț"),
];

/// Trims values, drops blanks, and removes case-insensitive duplicates,
/// keeping the spelling of the first occurrence.
pub fn dedupe_values<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.to_lowercase()))
        .map(ToString::to_string)
        .collect()
}

/// Replaces accented letters with their ASCII base letter, preserving case.
/// Characters without a folding are returned unchanged.
#[must_use]
pub fn fold_diacritics(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c;
    }
    let lower = c.to_lowercase().next().unwrap_or(c);
    match FOLDS.iter().find(|(_, accented)| accented.contains(lower)) {
        Some((base, _)) if c.is_uppercase() => base.to_ascii_uppercase(),
        Some((base, _)) => *base,
        None => c,
    }
}

/// Parses admin-entered numeric text: an optional sign, digits, and at most
/// one decimal point. Blank text, digit separators and exponents are not
/// numbers.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if !PLAIN_NUMBER.is_match(trimmed) {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}
