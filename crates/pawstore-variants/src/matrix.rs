//! Draft-level operations that tie the engine pieces to a [`ProductDraft`].

use std::collections::HashSet;

use pawstore_core::app_config::{DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_COMBINATIONS};
use pawstore_core::{AppConfig, AttributeVocabulary, ProductDraft, VariantId, VariantImage};

use crate::error::MatrixError;
use crate::generate::{combination_count, generate};
use crate::images::{assign_by_color, clear_by_color, find_color_attribute};
use crate::reconcile::{reconcile, NewVariantDefaults};

/// Limits and vocabulary the engine runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSettings {
    pub max_combinations: usize,
    pub max_attributes: usize,
    pub vocabulary: AttributeVocabulary,
}

impl MatrixSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_combinations: config.max_combinations,
            max_attributes: config.max_attributes,
            vocabulary: config.vocabulary.clone(),
        }
    }
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            vocabulary: AttributeVocabulary::default(),
        }
    }
}

/// What a call to [`generate_variants`] did to the row list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Rows on the draft afterwards.
    pub total: usize,
    /// Existing rows carried over with their edits.
    pub kept: usize,
    /// Rows created from defaults.
    pub created: usize,
    /// Existing rows whose combination no longer exists.
    pub dropped: usize,
}

/// Regenerates the draft's variant rows from its attribute definitions.
///
/// # Errors
///
/// Returns [`MatrixError::NoEligibleAttributes`] when no attribute has both
/// a name and a value, and [`MatrixError::TooManyCombinations`] when the
/// exact combination count exceeds the cap. The draft is untouched in both
/// cases.
pub fn generate_variants(
    draft: &mut ProductDraft,
    settings: &MatrixSettings,
) -> Result<GenerateSummary, MatrixError> {
    let count = combination_count(&draft.attributes);
    if count == 0 {
        return Err(MatrixError::NoEligibleAttributes);
    }
    if count > settings.max_combinations {
        tracing::warn!(
            count,
            max = settings.max_combinations,
            "refusing to generate variants over the cap"
        );
        return Err(MatrixError::TooManyCombinations {
            count,
            max: settings.max_combinations,
        });
    }

    let combinations = generate(&draft.attributes, settings.max_combinations);
    let defaults = NewVariantDefaults {
        sku_pattern: &draft.sku_pattern,
        product_code: draft.product_code(),
        price: &draft.price,
        cost_price: &draft.cost_price,
    };
    let rows = reconcile(combinations, &draft.variants, &defaults);

    // Counted per row: a hand-edited draft may repeat an id.
    let previous: HashSet<VariantId> = draft.variants.iter().map(|row| row.id).collect();
    let kept = rows.iter().filter(|row| previous.contains(&row.id)).count();
    let summary = GenerateSummary {
        total: rows.len(),
        kept,
        created: rows.len() - kept,
        dropped: draft.variants.len().saturating_sub(kept),
    };

    draft.variants = rows;
    tracing::info!(
        total = summary.total,
        kept = summary.kept,
        created = summary.created,
        dropped = summary.dropped,
        "generated variants"
    );
    Ok(summary)
}

/// Assigns `image` to every row whose color equals `color_value`.
///
/// # Errors
///
/// Returns [`MatrixError::NoColorAttribute`] when no attribute name is a
/// color synonym.
pub fn assign_color_image(
    draft: &mut ProductDraft,
    vocabulary: &AttributeVocabulary,
    color_value: &str,
    image: &VariantImage,
) -> Result<usize, MatrixError> {
    let color = color_attribute_name(draft, vocabulary)?;
    Ok(assign_by_color(&mut draft.variants, &color, color_value, image))
}

/// Clears the image of every row whose color equals `color_value`.
///
/// # Errors
///
/// Returns [`MatrixError::NoColorAttribute`] when no attribute name is a
/// color synonym.
pub fn clear_color_image(
    draft: &mut ProductDraft,
    vocabulary: &AttributeVocabulary,
    color_value: &str,
) -> Result<usize, MatrixError> {
    let color = color_attribute_name(draft, vocabulary)?;
    Ok(clear_by_color(&mut draft.variants, &color, color_value))
}

fn color_attribute_name(
    draft: &ProductDraft,
    vocabulary: &AttributeVocabulary,
) -> Result<String, MatrixError> {
    find_color_attribute(&draft.attributes, vocabulary)
        .map(|attr| attr.key().to_string())
        .ok_or(MatrixError::NoColorAttribute)
}

#[cfg(test)]
mod tests {
    use pawstore_core::AttributeDefinition;

    use super::*;

    fn draft(attributes: Vec<AttributeDefinition>) -> ProductDraft {
        ProductDraft {
            name: "Áo thun".to_string(),
            slug: "ao-thun".to_string(),
            has_variants: true,
            price: "120000".to_string(),
            attributes,
            ..ProductDraft::default()
        }
    }

    #[test]
    fn settings_follow_app_config() {
        let config = AppConfig {
            max_combinations: 50,
            max_attributes: 2,
            ..AppConfig::default()
        };
        let settings = MatrixSettings::from_app_config(&config);
        assert_eq!(settings.max_combinations, 50);
        assert_eq!(settings.max_attributes, 2);
        assert_eq!(settings.vocabulary, AttributeVocabulary::default());
    }

    #[test]
    fn first_generation_creates_every_row() {
        let mut d = draft(vec![
            AttributeDefinition::with_values("Size", ["S", "M"]),
            AttributeDefinition::with_values("Màu", ["Đỏ", "Xanh"]),
        ]);
        let summary = generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        assert_eq!(
            summary,
            GenerateSummary {
                total: 4,
                kept: 0,
                created: 4,
                dropped: 0
            }
        );
        assert_eq!(d.variants[0].sku, "AO-THUN-S-DO");
        assert_eq!(d.variants[0].price, "120000");
    }

    #[test]
    fn explicit_code_overrides_slug() {
        let mut d = draft(vec![AttributeDefinition::with_values("Size", ["M"])]);
        d.code = "at01".to_string();
        generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        assert_eq!(d.variants[0].sku, "AT01-M");
    }

    #[test]
    fn regeneration_keeps_edits_and_drops_stale_rows() {
        let mut d = draft(vec![AttributeDefinition::with_values("Size", ["S", "M"])]);
        generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        d.variants[1].price = "999".to_string();
        let edited = d.variants[1].id;

        d.attributes[0].values = vec!["M".to_string(), "L".to_string()];
        let summary = generate_variants(&mut d, &MatrixSettings::default()).unwrap();

        assert_eq!(
            summary,
            GenerateSummary {
                total: 2,
                kept: 1,
                created: 1,
                dropped: 1
            }
        );
        assert_eq!(d.variants[0].id, edited);
        assert_eq!(d.variants[0].price, "999");
    }

    #[test]
    fn repeated_row_ids_do_not_break_the_summary() {
        let mut d = draft(vec![AttributeDefinition::with_values("Size", ["S", "M"])]);
        generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        d.variants[1].id = d.variants[0].id;

        let summary = generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        assert_eq!(
            summary,
            GenerateSummary {
                total: 2,
                kept: 2,
                created: 0,
                dropped: 0
            }
        );

        d.attributes[0].values = vec!["S".to_string()];
        let summary = generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        assert_eq!(summary.kept, 1);
        assert_eq!(summary.dropped, 1);
    }

    #[test]
    fn no_eligible_attributes_is_an_error() {
        let mut d = draft(vec![AttributeDefinition::new("Size")]);
        assert_eq!(
            generate_variants(&mut d, &MatrixSettings::default()),
            Err(MatrixError::NoEligibleAttributes)
        );
    }

    #[test]
    fn over_the_cap_leaves_draft_untouched() {
        let mut d = draft(vec![
            AttributeDefinition::with_values("A", (0..3).map(|i| i.to_string())),
            AttributeDefinition::with_values("B", (0..67).map(|i| i.to_string())),
        ]);
        let settings = MatrixSettings::default();
        assert_eq!(
            generate_variants(&mut d, &settings),
            Err(MatrixError::TooManyCombinations { count: 201, max: 200 })
        );
        assert!(d.variants.is_empty());
    }

    #[test]
    fn color_images_need_a_color_attribute() {
        let mut d = draft(vec![AttributeDefinition::with_values("Size", ["S"])]);
        generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        let image = VariantImage::Remote {
            url: "https://cdn.example.com/a.webp".to_string(),
        };
        let vocab = AttributeVocabulary::default();
        assert_eq!(
            assign_color_image(&mut d, &vocab, "Đỏ", &image),
            Err(MatrixError::NoColorAttribute)
        );
        assert_eq!(
            clear_color_image(&mut d, &vocab, "Đỏ"),
            Err(MatrixError::NoColorAttribute)
        );
    }

    #[test]
    fn color_images_assign_and_clear() {
        let mut d = draft(vec![
            AttributeDefinition::with_values("Size", ["S", "M"]),
            AttributeDefinition::with_values("Màu", ["Đỏ", "Xanh"]),
        ]);
        generate_variants(&mut d, &MatrixSettings::default()).unwrap();
        let image = VariantImage::Local {
            path: "do.webp".into(),
        };
        let vocab = AttributeVocabulary::default();

        assert_eq!(assign_color_image(&mut d, &vocab, "Đỏ", &image), Ok(2));
        assert_eq!(clear_color_image(&mut d, &vocab, "Đỏ"), Ok(2));
        assert!(d.variants.iter().all(|row| row.image.is_none()));
    }
}
