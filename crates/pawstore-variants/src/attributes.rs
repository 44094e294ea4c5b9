//! Editing attribute definitions and cascading the edits into variant rows.
//!
//! Renames are two-step: [`plan_rename`] captures the old and new names from
//! the current definitions, and [`apply_rename`] rewrites the definition and
//! every row's map key in one pass. A plan made against an outdated name is
//! refused instead of guessed at.

use pawstore_core::{AttributeDefinition, AttributeId, VariantRow};

use crate::error::MatrixError;

/// Appends a new attribute and returns its id.
///
/// # Errors
///
/// Returns [`MatrixError::TooManyAttributes`] when `max` attributes already exist.
pub fn add_attribute(
    attributes: &mut Vec<AttributeDefinition>,
    name: &str,
    max: usize,
) -> Result<AttributeId, MatrixError> {
    if attributes.len() >= max {
        return Err(MatrixError::TooManyAttributes { max });
    }
    let attr = AttributeDefinition::new(name.trim());
    let id = attr.id;
    attributes.push(attr);
    Ok(id)
}

/// Adds a value to an attribute. Blank values and case-insensitive
/// duplicates are ignored; returns whether the value was added.
///
/// # Errors
///
/// Returns [`MatrixError::AttributeNotFound`] for an unknown id.
pub fn add_value(
    attributes: &mut [AttributeDefinition],
    id: AttributeId,
    raw: &str,
) -> Result<bool, MatrixError> {
    let attr = find_mut(attributes, id)?;
    let value = raw.trim();
    if value.is_empty() {
        return Ok(false);
    }
    let lower = value.to_lowercase();
    if attr
        .values
        .iter()
        .any(|v| v.trim().to_lowercase() == lower)
    {
        return Ok(false);
    }
    attr.values.push(value.to_string());
    Ok(true)
}

/// Removes an exact value from an attribute. Variant rows are left alone;
/// rows using the value drop out on the next generation.
///
/// # Errors
///
/// Returns [`MatrixError::AttributeNotFound`] for an unknown id.
pub fn remove_value(
    attributes: &mut [AttributeDefinition],
    id: AttributeId,
    value: &str,
) -> Result<bool, MatrixError> {
    let attr = find_mut(attributes, id)?;
    let before = attr.values.len();
    attr.values.retain(|v| v != value);
    Ok(attr.values.len() != before)
}

/// A pending rename, computed from the definitions as they were when planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub id: AttributeId,
    pub from: String,
    pub to: String,
}

/// Computes the rename of attribute `id` to `new_name` without changing
/// anything. Returns `None` when the trimmed name is unchanged.
///
/// # Errors
///
/// Returns [`MatrixError::AttributeNotFound`] for an unknown id.
pub fn plan_rename(
    attributes: &[AttributeDefinition],
    id: AttributeId,
    new_name: &str,
) -> Result<Option<RenamePlan>, MatrixError> {
    let attr = attributes
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| MatrixError::AttributeNotFound(id.to_string()))?;
    let from = attr.key();
    let to = new_name.trim();
    if from == to {
        return Ok(None);
    }
    Ok(Some(RenamePlan {
        id,
        from: from.to_string(),
        to: to.to_string(),
    }))
}

/// Applies a rename to the definition and to every variant row's attribute
/// map. Returns the number of rows whose key was rewritten.
///
/// # Errors
///
/// Returns [`MatrixError::AttributeNotFound`] if the attribute is gone, or
/// [`MatrixError::StaleRename`] if it was renamed since the plan was made.
pub fn apply_rename(
    plan: &RenamePlan,
    attributes: &mut [AttributeDefinition],
    variants: &mut [VariantRow],
) -> Result<usize, MatrixError> {
    let attr = find_mut(attributes, plan.id)?;
    if attr.key() != plan.from {
        return Err(MatrixError::StaleRename {
            expected: plan.from.clone(),
            actual: attr.key().to_string(),
        });
    }
    attr.name.clone_from(&plan.to);

    let mut rewritten = 0;
    for row in variants.iter_mut() {
        if row.attributes.rename_key(&plan.from, &plan.to) {
            rewritten += 1;
        }
    }

    tracing::debug!(
        from = %plan.from,
        to = %plan.to,
        rows = rewritten,
        "renamed attribute"
    );
    Ok(rewritten)
}

/// Removes an attribute and its key from every variant row.
///
/// Rows that become identical are not merged; validation reports them.
///
/// # Errors
///
/// Returns [`MatrixError::AttributeNotFound`] for an unknown id.
pub fn remove_attribute(
    attributes: &mut Vec<AttributeDefinition>,
    variants: &mut [VariantRow],
    id: AttributeId,
) -> Result<AttributeDefinition, MatrixError> {
    let idx = attributes
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| MatrixError::AttributeNotFound(id.to_string()))?;
    let removed = attributes.remove(idx);

    let key = removed.key();
    let mut touched = 0;
    for row in variants.iter_mut() {
        if row.attributes.remove(key).is_some() {
            touched += 1;
        }
    }

    tracing::debug!(attribute = %key, rows = touched, "removed attribute");
    Ok(removed)
}

fn find_mut(
    attributes: &mut [AttributeDefinition],
    id: AttributeId,
) -> Result<&mut AttributeDefinition, MatrixError> {
    attributes
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| MatrixError::AttributeNotFound(id.to_string()))
}
