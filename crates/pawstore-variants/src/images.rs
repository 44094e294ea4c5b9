//! Per-color image assignment.
//!
//! The color attribute is found by name through the configured synonym list;
//! without one the feature is inactive.

use pawstore_core::{AttributeDefinition, AttributeVocabulary, VariantImage, VariantRow};

use crate::text::dedupe_values;

/// First attribute whose name is a configured color synonym.
#[must_use]
pub fn find_color_attribute<'a>(
    attributes: &'a [AttributeDefinition],
    vocabulary: &AttributeVocabulary,
) -> Option<&'a AttributeDefinition> {
    attributes.iter().find(|a| vocabulary.is_color(a.key()))
}

/// The distinct colors that each get one image slot.
#[must_use]
pub fn color_values(color_attribute: &AttributeDefinition) -> Vec<String> {
    dedupe_values(&color_attribute.values)
}

/// Sets `image` on every row whose `color_attribute` value equals
/// `color_value` exactly. Returns the number of rows updated.
pub fn assign_by_color(
    variants: &mut [VariantRow],
    color_attribute: &str,
    color_value: &str,
    image: &VariantImage,
) -> usize {
    let mut updated = 0;
    for row in matching(variants, color_attribute, color_value) {
        row.image = Some(image.clone());
        updated += 1;
    }
    tracing::debug!(color = %color_value, rows = updated, "assigned color image");
    updated
}

/// Removes the image from every row with the given color.
pub fn clear_by_color(variants: &mut [VariantRow], color_attribute: &str, color_value: &str) -> usize {
    let mut cleared = 0;
    for row in matching(variants, color_attribute, color_value) {
        if row.image.take().is_some() {
            cleared += 1;
        }
    }
    cleared
}

fn matching<'a>(
    variants: &'a mut [VariantRow],
    color_attribute: &'a str,
    color_value: &'a str,
) -> impl Iterator<Item = &'a mut VariantRow> {
    variants
        .iter_mut()
        .filter(move |row| row.attributes.get(color_attribute) == Some(color_value))
}

#[cfg(test)]
mod tests {
    use pawstore_core::{AttributeMap, VariantId, VariantStatus};

    use super::*;

    fn row(size: &str, color: Option<&str>) -> VariantRow {
        let mut attributes = AttributeMap::new();
        attributes.insert("Size", size);
        if let Some(color) = color {
            attributes.insert("Màu", color);
        }
        VariantRow {
            id: VariantId::new(),
            attributes,
            sku: String::new(),
            price: "1".to_string(),
            cost_price: String::new(),
            stock: "0".to_string(),
            status: VariantStatus::Active,
            image: None,
        }
    }

    fn red_image() -> VariantImage {
        VariantImage::Remote {
            url: "https://cdn.example.com/do.webp".to_string(),
        }
    }

    #[test]
    fn finds_color_attribute_by_synonym() {
        let attrs = vec![
            AttributeDefinition::new("Size"),
            AttributeDefinition::with_values(" màu ", ["Đỏ"]),
        ];
        let vocab = AttributeVocabulary::default();
        let found = find_color_attribute(&attrs, &vocab).expect("color attribute");
        assert_eq!(found.key(), "màu");
    }

    #[test]
    fn no_color_attribute_means_inactive() {
        let attrs = vec![AttributeDefinition::new("Size")];
        assert!(find_color_attribute(&attrs, &AttributeVocabulary::default()).is_none());
    }

    #[test]
    fn injected_synonyms_replace_defaults() {
        let attrs = vec![AttributeDefinition::new("Farbe")];
        let vocab = AttributeVocabulary {
            color: vec!["farbe".to_string()],
            ..AttributeVocabulary::default()
        };
        assert!(find_color_attribute(&attrs, &vocab).is_some());
    }

    #[test]
    fn color_values_are_distinct() {
        let attr = AttributeDefinition::with_values("Màu", ["Đỏ", "đỏ", "Xanh"]);
        assert_eq!(color_values(&attr), vec!["Đỏ", "Xanh"]);
    }

    #[test]
    fn assigns_only_matching_rows() {
        let mut rows = vec![
            row("S", Some("Đỏ")),
            row("S", Some("Xanh")),
            row("M", Some("Đỏ")),
            row("M", None),
        ];
        let n = assign_by_color(&mut rows, "Màu", "Đỏ", &red_image());
        assert_eq!(n, 2);
        assert_eq!(rows[0].image, Some(red_image()));
        assert!(rows[1].image.is_none());
        assert_eq!(rows[2].image, Some(red_image()));
        assert!(rows[3].image.is_none());
    }

    #[test]
    fn value_match_is_case_sensitive() {
        let mut rows = vec![row("S", Some("Đỏ"))];
        assert_eq!(assign_by_color(&mut rows, "Màu", "đỏ", &red_image()), 0);
        assert!(rows[0].image.is_none());
    }

    #[test]
    fn clear_removes_matching_images() {
        let mut rows = vec![row("S", Some("Đỏ")), row("S", Some("Xanh"))];
        assign_by_color(&mut rows, "Màu", "Đỏ", &red_image());
        assign_by_color(&mut rows, "Màu", "Xanh", &red_image());
        assert_eq!(clear_by_color(&mut rows, "Màu", "Đỏ"), 1);
        assert!(rows[0].image.is_none());
        assert!(rows[1].image.is_some());
    }
}
