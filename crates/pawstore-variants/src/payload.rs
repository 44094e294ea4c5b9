//! The submit payload for the persistence backend.
//!
//! The backend stores variants with fixed `size`, `color` and `material`
//! columns. Attributes are matched to those by name through the configured
//! vocabulary; anything else has nowhere to go and is left out.

use pawstore_core::{AttributeRole, AttributeVocabulary, ProductDraft, VariantRow};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;
use crate::text::parse_decimal;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub slug: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<String>,
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub has_variants: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantPayload {
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    pub stock: i64,
    pub active: bool,
}

/// Validates `draft` and maps it onto the backend payload.
///
/// # Errors
///
/// Returns the first [`ValidationError`] the draft breaks; nothing is built
/// for an invalid draft.
pub fn build_payload(
    draft: &ProductDraft,
    vocabulary: &AttributeVocabulary,
) -> Result<ProductPayload, ValidationError> {
    crate::validate::validate_draft(draft)?;

    let images = draft
        .images
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(ToString::to_string)
        .collect();

    let mut payload = ProductPayload {
        name: draft.name.trim().to_string(),
        slug: draft.slug.trim().to_string(),
        category_id: draft
            .category_id
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        description: draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string),
        images,
        weight: draft.dimensions.weight,
        length: draft.dimensions.length,
        width: draft.dimensions.width,
        height: draft.dimensions.height,
        has_variants: draft.has_variants,
        sku: None,
        price: None,
        cost_price: None,
        stock: None,
        variants: Vec::new(),
    };

    if draft.has_variants {
        let unmapped: Vec<&str> = draft
            .attributes
            .iter()
            .map(pawstore_core::AttributeDefinition::key)
            .filter(|name| vocabulary.role_of(name).is_none())
            .collect();
        if !unmapped.is_empty() {
            tracing::debug!(
                attributes = ?unmapped,
                "attributes without a backend field are left out of the payload"
            );
        }

        payload.variants = draft
            .variants
            .iter()
            .map(|row| variant_payload(row, vocabulary, draft.manage_variant_stock))
            .collect();
    } else {
        payload.sku = Some(draft.sku.trim().to_string());
        payload.price = parse_decimal(&draft.price);
        payload.cost_price = parse_decimal(&draft.cost_price);
        payload.stock = Some(stock_count(&draft.stock, draft.manage_stock));
    }

    Ok(payload)
}

fn variant_payload(
    row: &VariantRow,
    vocabulary: &AttributeVocabulary,
    manage_stock: bool,
) -> VariantPayload {
    let mut size = None;
    let mut color = None;
    let mut material = None;

    for (name, value) in row.attributes.iter() {
        let slot = match vocabulary.role_of(name) {
            Some(AttributeRole::Size) => &mut size,
            Some(AttributeRole::Color) => &mut color,
            Some(AttributeRole::Material) => &mut material,
            None => continue,
        };
        if slot.is_none() {
            *slot = Some(value.trim().to_string());
        }
    }

    VariantPayload {
        sku: row.sku.trim().to_string(),
        size,
        color,
        material,
        price: parse_decimal(&row.price).unwrap_or_default(),
        cost_price: parse_decimal(&row.cost_price),
        stock: stock_count(&row.stock, manage_stock),
        active: row.is_active(),
    }
}

/// Whole units in stock; `0` when stock is not tracked.
fn stock_count(raw: &str, managed: bool) -> i64 {
    if !managed {
        return 0;
    }
    let Some(value) = parse_decimal(raw) else {
        return 0;
    };
    let whole = value.trunc();
    if whole != value {
        tracing::warn!(stock = %value, sent = %whole, "fractional stock truncated");
    }
    whole.to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use pawstore_core::{
        AttributeDefinition, AttributeMap, ShippingDimensions, VariantId, VariantStatus,
    };

    use super::*;

    fn row(pairs: &[(&str, &str)], sku: &str) -> VariantRow {
        VariantRow {
            id: VariantId::new(),
            attributes: pairs.iter().copied().collect::<AttributeMap>(),
            sku: sku.to_string(),
            price: "150000".to_string(),
            cost_price: String::new(),
            stock: "7.9".to_string(),
            status: VariantStatus::Active,
            image: None,
        }
    }

    fn base() -> ProductDraft {
        ProductDraft {
            name: " Áo hoodie ".to_string(),
            slug: "ao-hoodie".to_string(),
            category_id: Some("apparel".to_string()),
            images: vec!["a.webp".to_string(), "  ".to_string()],
            dimensions: ShippingDimensions {
                weight: 300.0,
                length: 30.0,
                width: 20.0,
                height: 3.0,
            },
            ..ProductDraft::default()
        }
    }

    fn variant_draft() -> ProductDraft {
        let mut inactive = row(
            &[("Size", "M"), ("Màu", "Đỏ"), ("Kiểu", "Trơn")],
            "HD-M-DO",
        );
        inactive.status = VariantStatus::Inactive;
        ProductDraft {
            has_variants: true,
            attributes: vec![
                AttributeDefinition::with_values("Size", ["S", "M"]),
                AttributeDefinition::with_values("Màu", ["Đỏ"]),
                AttributeDefinition::with_values("Kiểu", ["Trơn"]),
            ],
            variants: vec![
                row(&[("Size", "S"), ("Màu", "Đỏ"), ("Kiểu", "Trơn")], "HD-S-DO"),
                inactive,
            ],
            ..base()
        }
    }

    #[test]
    fn invalid_draft_builds_nothing() {
        let draft = ProductDraft {
            name: String::new(),
            ..variant_draft()
        };
        assert_eq!(
            build_payload(&draft, &AttributeVocabulary::default()),
            Err(ValidationError::NameRequired)
        );
    }

    #[test]
    fn recognized_attributes_fill_fixed_fields() {
        let payload = build_payload(&variant_draft(), &AttributeVocabulary::default()).unwrap();
        assert_eq!(payload.name, "Áo hoodie");
        assert_eq!(payload.images, vec!["a.webp"]);
        assert!(payload.sku.is_none());

        let first = &payload.variants[0];
        assert_eq!(first.size.as_deref(), Some("S"));
        assert_eq!(first.color.as_deref(), Some("Đỏ"));
        assert!(first.material.is_none());
        assert_eq!(first.price, Decimal::new(150_000, 0));
        assert_eq!(first.stock, 7);
        assert!(first.active);
        assert!(!payload.variants[1].active);
    }

    #[test]
    fn unrecognized_attributes_are_dropped() {
        let payload = build_payload(&variant_draft(), &AttributeVocabulary::default()).unwrap();
        let json = serde_json::to_value(&payload.variants[0]).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert!(!keys.contains(&"Kiểu"));
        assert!(!json.to_string().contains("Trơn"));
    }

    #[test]
    fn stock_count_keeps_whole_units() {
        assert_eq!(stock_count("7.9", true), 7);
        assert_eq!(stock_count(" 3 ", true), 3);
        assert_eq!(stock_count("0.5", true), 0);
        assert_eq!(stock_count("abc", true), 0);
        assert_eq!(stock_count("7.9", false), 0);
    }

    #[test]
    fn unmanaged_variant_stock_is_zero() {
        let draft = ProductDraft {
            manage_variant_stock: false,
            ..variant_draft()
        };
        let payload = build_payload(&draft, &AttributeVocabulary::default()).unwrap();
        assert!(payload.variants.iter().all(|v| v.stock == 0));
    }

    #[test]
    fn simple_product_carries_its_own_fields() {
        let draft = ProductDraft {
            sku: "HD-01".to_string(),
            price: "250000".to_string(),
            cost_price: "100000".to_string(),
            stock: "4".to_string(),
            ..base()
        };
        let payload = build_payload(&draft, &AttributeVocabulary::default()).unwrap();
        assert_eq!(payload.sku.as_deref(), Some("HD-01"));
        assert_eq!(payload.price, Some(Decimal::new(250_000, 0)));
        assert_eq!(payload.cost_price, Some(Decimal::new(100_000, 0)));
        assert_eq!(payload.stock, Some(4));
        assert!(payload.variants.is_empty());

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("variants").is_none());
        assert_eq!(json["category_id"], "apparel");
    }
}
