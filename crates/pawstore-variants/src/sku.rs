//! Template-based SKU derivation.
//!
//! A pattern such as `"{CODE}-{ATTRS}"` is resolved per variant. `{CODE}`
//! becomes the uppercased product code; `{ATTRS}` becomes the variant's
//! attribute values in map order, folded to ASCII, hyphen-joined and
//! uppercased. Any other text, including unknown `{TOKENS}`, is kept as-is.

use std::sync::LazyLock;

use pawstore_core::AttributeMap;
use regex::Regex;

use crate::text::fold_diacritics;

pub const CODE_TOKEN: &str = "{CODE}";
pub const ATTRS_TOKEN: &str = "{ATTRS}";

static NON_SKU_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]").expect("valid sku charset regex"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("valid hyphen run regex"));

/// Resolves `pattern` into a SKU for one variant.
///
/// Pure and total: an empty attribute map resolves `{ATTRS}` to nothing and
/// the surrounding hyphens are tidied away.
#[must_use]
pub fn resolve_sku(pattern: &str, product_code: &str, attributes: &AttributeMap) -> String {
    let code = product_code.to_uppercase();
    let attrs = attribute_segment(attributes);

    // Split on {CODE} first so a code that happens to contain "{ATTRS}" is
    // never substituted a second time.
    let raw = pattern
        .split(CODE_TOKEN)
        .map(|piece| piece.replace(ATTRS_TOKEN, &attrs))
        .collect::<Vec<_>>()
        .join(&code);

    tidy_hyphens(&raw)
}

/// The `{ATTRS}` replacement: values joined with `-`, reduced to
/// `[A-Z0-9-]` with single hyphens.
fn attribute_segment(attributes: &AttributeMap) -> String {
    let joined = attributes.values().collect::<Vec<_>>().join("-");
    let folded = fold_diacritics(&joined);
    let safe = NON_SKU_CHAR.replace_all(&folded, "-");
    HYPHEN_RUN.replace_all(&safe, "-").to_ascii_uppercase()
}

/// Collapses hyphen runs and trims hyphens from both ends.
fn tidy_hyphens(raw: &str) -> String {
    HYPHEN_RUN
        .replace_all(raw, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
#[path = "sku_test.rs"]
mod tests;
