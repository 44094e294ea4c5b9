//! Pre-submit validation of a [`ProductDraft`].
//!
//! Rules run in a fixed order and the first broken one is reported. Invalid
//! intermediate states are allowed while editing; this is the only gate.

use std::collections::HashSet;

use pawstore_core::{ProductDraft, VariantRow};
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::text::{dedupe_values, parse_decimal};

/// Checks `draft` and returns the first rule it breaks.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first failing rule.
pub fn validate_draft(draft: &ProductDraft) -> Result<(), ValidationError> {
    validate_basics(draft)?;

    if draft.has_variants {
        validate_attributes(draft)?;
        validate_variant_rows(draft)
    } else {
        validate_simple(draft)
    }
}

fn validate_basics(draft: &ProductDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if draft.slug.trim().is_empty() {
        return Err(ValidationError::SlugRequired);
    }
    if draft
        .category_id
        .as_deref()
        .is_none_or(|c| c.trim().is_empty())
    {
        return Err(ValidationError::CategoryRequired);
    }
    if !draft.images.iter().any(|i| !i.trim().is_empty()) {
        return Err(ValidationError::ImageRequired);
    }
    for (field, value) in draft.dimensions.fields() {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidDimension { field });
        }
    }
    Ok(())
}

fn validate_simple(draft: &ProductDraft) -> Result<(), ValidationError> {
    if draft.sku.trim().is_empty() {
        return Err(ValidationError::SkuRequired);
    }
    if !is_positive(&draft.price) {
        return Err(ValidationError::InvalidPrice);
    }
    if draft.manage_stock && !is_non_negative(&draft.stock) {
        return Err(ValidationError::InvalidStock);
    }
    Ok(())
}

fn validate_attributes(draft: &ProductDraft) -> Result<(), ValidationError> {
    if draft.attributes.is_empty() {
        return Err(ValidationError::NoAttributes);
    }

    let mut seen_names = HashSet::new();
    for (idx, attr) in draft.attributes.iter().enumerate() {
        let name = attr.key();
        if name.is_empty() {
            return Err(ValidationError::AttributeNameRequired { position: idx + 1 });
        }
        if dedupe_values(&attr.values).is_empty() {
            return Err(ValidationError::AttributeValuesRequired {
                name: name.to_string(),
            });
        }
        if !seen_names.insert(name.to_lowercase()) {
            return Err(ValidationError::DuplicateAttributeName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_variant_rows(draft: &ProductDraft) -> Result<(), ValidationError> {
    if draft.variants.is_empty() {
        return Err(ValidationError::NoVariants);
    }

    let mut seen_skus = HashSet::new();
    let mut seen_keys = HashSet::new();

    for (idx, row) in draft.variants.iter().enumerate() {
        let sku = row.sku.trim();
        if sku.is_empty() {
            return Err(ValidationError::VariantSkuRequired { row: idx + 1 });
        }
        if !seen_skus.insert(sku.to_lowercase()) {
            return Err(ValidationError::DuplicateSku {
                sku: sku.to_string(),
            });
        }
        if !is_positive(&row.price) {
            return Err(ValidationError::InvalidVariantPrice {
                sku: sku.to_string(),
            });
        }
        if draft.manage_variant_stock && !is_non_negative(&row.stock) {
            return Err(ValidationError::InvalidVariantStock {
                sku: sku.to_string(),
            });
        }
        if let Some(attribute) = first_missing_attribute(draft, row) {
            return Err(ValidationError::MissingAttributeValue {
                sku: sku.to_string(),
                attribute: attribute.to_string(),
            });
        }
        let key = row.combination_key();
        if !seen_keys.insert(key.clone()) {
            return Err(ValidationError::DuplicateCombination { key });
        }
    }
    Ok(())
}

fn first_missing_attribute<'a>(draft: &'a ProductDraft, row: &VariantRow) -> Option<&'a str> {
    draft
        .attributes
        .iter()
        .map(pawstore_core::AttributeDefinition::key)
        .find(|name| {
            row.attributes
                .get(name)
                .is_none_or(|value| value.trim().is_empty())
        })
}

fn is_positive(raw: &str) -> bool {
    parse_decimal(raw).is_some_and(|v| v > Decimal::ZERO)
}

fn is_non_negative(raw: &str) -> bool {
    parse_decimal(raw).is_some_and(|v| v >= Decimal::ZERO)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
