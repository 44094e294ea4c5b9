//! Cartesian expansion of attribute definitions into combinations.

use pawstore_core::{AttributeDefinition, AttributeMap};

use crate::text::dedupe_values;

/// One attribute that takes part in generation: trimmed name plus its
/// de-duplicated values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    pub name: String,
    pub values: Vec<String>,
}

/// Attributes with a non-blank name and at least one distinct value, in
/// definition order. Everything else is skipped silently.
#[must_use]
pub fn eligible_axes(attributes: &[AttributeDefinition]) -> Vec<Axis> {
    attributes
        .iter()
        .filter_map(|attr| {
            let name = attr.key();
            let values = dedupe_values(&attr.values);
            if name.is_empty() || values.is_empty() {
                None
            } else {
                Some(Axis {
                    name: name.to_string(),
                    values,
                })
            }
        })
        .collect()
}

/// Exact number of combinations [`generate`] would produce without a cap.
///
/// Returns `0` when no attribute is eligible and saturates at `usize::MAX`.
#[must_use]
pub fn combination_count(attributes: &[AttributeDefinition]) -> usize {
    let axes = eligible_axes(attributes);
    if axes.is_empty() {
        return 0;
    }
    axes.iter()
        .try_fold(1usize, |acc, axis| acc.checked_mul(axis.values.len()))
        .unwrap_or(usize::MAX)
}

/// Expands `attributes` into every combination of one value per eligible
/// attribute, stopping after exactly `max` combinations.
///
/// The first attribute varies slowest, as with nested loops in definition
/// order. Each combination's map lists attributes in definition order.
#[must_use]
pub fn generate(attributes: &[AttributeDefinition], max: usize) -> Vec<AttributeMap> {
    let axes = eligible_axes(attributes);
    if axes.is_empty() || max == 0 {
        return Vec::new();
    }

    let mut combinations = Vec::new();
    let mut cursor = vec![0usize; axes.len()];

    loop {
        let combination: AttributeMap = axes
            .iter()
            .zip(&cursor)
            .map(|(axis, &i)| (axis.name.as_str(), axis.values[i].as_str()))
            .collect();
        combinations.push(combination);
        if combinations.len() >= max {
            return combinations;
        }

        // Advance the odometer: last axis fastest, carry leftwards.
        let mut pos = axes.len();
        loop {
            if pos == 0 {
                return combinations;
            }
            pos -= 1;
            cursor[pos] += 1;
            if cursor[pos] < axes[pos].values.len() {
                break;
            }
            cursor[pos] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, values: &[&str]) -> AttributeDefinition {
        AttributeDefinition::with_values(name, values.iter().copied())
    }

    fn numbered(name: &str, n: usize) -> AttributeDefinition {
        AttributeDefinition::with_values(name, (0..n).map(|i| format!("{name}{i}")))
    }

    #[test]
    fn eligible_axes_skip_blank_names_and_empty_values() {
        let attrs = vec![
            attr("  ", &["S"]),
            attr("Size", &["S", "s", " M "]),
            attr("Màu", &["", "  "]),
        ];
        let axes = eligible_axes(&attrs);
        assert_eq!(
            axes,
            vec![Axis {
                name: "Size".to_string(),
                values: vec!["S".to_string(), "M".to_string()],
            }]
        );
    }

    #[test]
    fn no_eligible_attributes_yields_empty() {
        let attrs = vec![attr("", &["S"]), attr("Size", &[])];
        assert!(generate(&attrs, 200).is_empty());
        assert_eq!(combination_count(&attrs), 0);
        assert!(generate(&[], 200).is_empty());
    }

    #[test]
    fn generates_full_product_in_nested_loop_order() {
        let attrs = vec![attr("Size", &["S", "M"]), attr("Màu", &["Đỏ", "Xanh", "Vàng"])];
        let combos = generate(&attrs, 200);
        let keys: Vec<String> = combos
            .iter()
            .map(|c| c.values().collect::<Vec<_>>().join("/"))
            .collect();
        assert_eq!(
            keys,
            vec!["S/Đỏ", "S/Xanh", "S/Vàng", "M/Đỏ", "M/Xanh", "M/Vàng"]
        );
        assert_eq!(combination_count(&attrs), 6);
    }

    #[test]
    fn combination_maps_follow_definition_order() {
        let attrs = vec![attr("Màu", &["Đỏ"]), attr("Size", &["S"])];
        let combos = generate(&attrs, 200);
        assert_eq!(combos[0].names().collect::<Vec<_>>(), vec!["Màu", "Size"]);
    }

    #[test]
    fn completeness_over_three_axes() {
        let attrs = vec![numbered("a", 3), numbered("b", 4), numbered("c", 5)];
        let combos = generate(&attrs, 200);
        assert_eq!(combos.len(), 60);
        let distinct: std::collections::HashSet<String> =
            combos.iter().map(AttributeMap::combination_key).collect();
        assert_eq!(distinct.len(), 60);
        assert!(combos.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn exactly_at_cap_is_complete() {
        let attrs = vec![numbered("a", 10), numbered("b", 20)];
        assert_eq!(combination_count(&attrs), 200);
        assert_eq!(generate(&attrs, 200).len(), 200);
    }

    #[test]
    fn strict_cutoff_above_cap() {
        let attrs = vec![numbered("a", 3), numbered("b", 67)];
        assert_eq!(combination_count(&attrs), 201);
        let combos = generate(&attrs, 200);
        assert_eq!(combos.len(), 200);
        // The cut is at the tail of enumeration order.
        assert_eq!(combos[199].get("a"), Some("a2"));
        assert_eq!(combos[199].get("b"), Some("b65"));
    }

    #[test]
    fn zero_cap_yields_empty() {
        let attrs = vec![attr("Size", &["S"])];
        assert!(generate(&attrs, 0).is_empty());
    }

    #[test]
    fn combination_count_saturates() {
        let attrs: Vec<_> = (0..5).map(|i| numbered(&format!("x{i}"), 10_000)).collect();
        assert_eq!(combination_count(&attrs), usize::MAX);
    }
}
