//! Bulk edits over a selection of variant rows.
//!
//! An empty [`Selection`] means every row. Per-row work never fails: rows a
//! change cannot apply to are skipped, and each operation reports how many
//! rows it changed.

use std::collections::HashSet;

use pawstore_core::{VariantId, VariantRow, VariantStatus};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::sku::resolve_sku;
use crate::text::parse_decimal;

/// Rows picked in the variant table. Ids that match no row are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(HashSet<VariantId>);

impl Selection {
    /// The empty selection, which bulk operations treat as "all rows".
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn includes(&self, id: VariantId) -> bool {
        self.0.is_empty() || self.0.contains(&id)
    }

    /// Adds `id` if absent, removes it if present.
    pub fn toggle(&mut self, id: VariantId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<VariantId> for Selection {
    fn from_iter<I: IntoIterator<Item = VariantId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Free-text fields that can be overwritten in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkField {
    Price,
    CostPrice,
    Stock,
}

fn selected<'a>(
    variants: &'a mut [VariantRow],
    selection: &'a Selection,
) -> impl Iterator<Item = &'a mut VariantRow> {
    variants
        .iter_mut()
        .filter(move |row| selection.includes(row.id))
}

/// Writes `raw` verbatim into `field` of every selected row.
pub fn set_field(
    variants: &mut [VariantRow],
    selection: &Selection,
    field: BulkField,
    raw: &str,
) -> usize {
    let mut changed = 0;
    for row in selected(variants, selection) {
        let slot = match field {
            BulkField::Price => &mut row.price,
            BulkField::CostPrice => &mut row.cost_price,
            BulkField::Stock => &mut row.stock,
        };
        raw.clone_into(slot);
        changed += 1;
    }
    tracing::debug!(?field, rows = changed, "bulk set field");
    changed
}

/// Scales the price of every selected row by `percent` (e.g. `10.0` adds
/// 10%, `-25.0` takes a quarter off), rounding to a whole amount with
/// halves away from zero.
///
/// Rows whose price is not a positive number are left untouched, as is
/// everything when `percent` is not finite.
pub fn adjust_price_percent(
    variants: &mut [VariantRow],
    selection: &Selection,
    percent: f64,
) -> usize {
    let Ok(percent) = Decimal::try_from(percent) else {
        return 0;
    };
    let factor = Decimal::ONE + percent / Decimal::ONE_HUNDRED;

    let mut changed = 0;
    for row in selected(variants, selection) {
        let Some(old) = parse_decimal(&row.price) else {
            continue;
        };
        if old <= Decimal::ZERO {
            continue;
        }
        let Some(scaled) = old.checked_mul(factor) else {
            continue;
        };
        let new = scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        row.price = new.to_string();
        changed += 1;
    }
    tracing::debug!(%percent, rows = changed, "bulk price adjustment");
    changed
}

/// Recomputes the SKU of every selected row from its own attributes,
/// overwriting manual edits.
pub fn reapply_sku_pattern(
    variants: &mut [VariantRow],
    selection: &Selection,
    pattern: &str,
    product_code: &str,
) -> usize {
    let mut changed = 0;
    for row in selected(variants, selection) {
        row.sku = resolve_sku(pattern, product_code, &row.attributes);
        changed += 1;
    }
    tracing::debug!(pattern, rows = changed, "bulk sku reapply");
    changed
}

pub fn set_status(
    variants: &mut [VariantRow],
    selection: &Selection,
    status: VariantStatus,
) -> usize {
    let mut changed = 0;
    for row in selected(variants, selection) {
        row.status = status;
        changed += 1;
    }
    tracing::debug!(%status, rows = changed, "bulk status change");
    changed
}

/// Deletes exactly the rows listed in `ids`. Unlike the bulk edits, an empty
/// list deletes nothing.
pub fn remove_variants(variants: &mut Vec<VariantRow>, ids: &[VariantId]) -> usize {
    let before = variants.len();
    variants.retain(|row| !ids.contains(&row.id));
    before - variants.len()
}
