//! Merging freshly generated combinations with the rows already on a draft.

use std::collections::HashMap;

use pawstore_core::{AttributeMap, VariantId, VariantRow, VariantStatus};

use crate::sku::resolve_sku;

/// Field values given to rows that have no existing counterpart.
#[derive(Debug, Clone, Copy)]
pub struct NewVariantDefaults<'a> {
    pub sku_pattern: &'a str,
    pub product_code: &'a str,
    /// The product's base price text; may be empty.
    pub price: &'a str,
    pub cost_price: &'a str,
}

/// Builds the variant list for `combinations`.
///
/// An existing row whose combination key matches is carried over unchanged,
/// edits included. Unmatched combinations get a new row built from
/// `defaults`. Existing rows whose combination is not in `combinations` are
/// dropped. Output order is the order of `combinations`.
///
/// When two existing rows share a key the later one wins.
#[must_use]
pub fn reconcile(
    combinations: Vec<AttributeMap>,
    existing: &[VariantRow],
    defaults: &NewVariantDefaults<'_>,
) -> Vec<VariantRow> {
    let by_key: HashMap<String, &VariantRow> = existing
        .iter()
        .map(|row| (row.combination_key(), row))
        .collect();

    combinations
        .into_iter()
        .map(|combination| match by_key.get(&combination.combination_key()) {
            Some(row) => (*row).clone(),
            None => new_row(combination, defaults),
        })
        .collect()
}

fn new_row(attributes: AttributeMap, defaults: &NewVariantDefaults<'_>) -> VariantRow {
    let sku = resolve_sku(defaults.sku_pattern, defaults.product_code, &attributes);
    VariantRow {
        id: VariantId::new(),
        attributes,
        sku,
        price: defaults.price.to_string(),
        cost_price: defaults.cost_price.to_string(),
        stock: "0".to_string(),
        status: VariantStatus::Active,
        image: None,
    }
}
