//! `attribute` sub-commands. Attributes are addressed by id or by name.

use clap::Subcommand;
use pawstore_core::{AttributeId, ProductDraft};
use pawstore_variants::attributes::{
    add_attribute, add_value, apply_rename, plan_rename, remove_attribute, remove_value,
};
use pawstore_variants::MatrixSettings;

#[derive(Debug, Subcommand)]
pub enum AttributeCommands {
    /// Add an attribute, optionally with its first values
    Add {
        name: String,
        /// Value to add (repeatable)
        #[arg(long = "value")]
        values: Vec<String>,
    },
    /// Rename an attribute and the matching key on every variant row
    Rename { attribute: String, new_name: String },
    /// Remove an attribute and its key from every variant row
    Remove { attribute: String },
    /// Add a value to an attribute
    AddValue { attribute: String, value: String },
    /// Remove a value from an attribute (exact match)
    RemoveValue { attribute: String, value: String },
}

pub(crate) fn run(
    command: AttributeCommands,
    draft: &mut ProductDraft,
    settings: &MatrixSettings,
) -> anyhow::Result<bool> {
    match command {
        AttributeCommands::Add { name, values } => {
            let id = add_attribute(&mut draft.attributes, &name, settings.max_attributes)?;
            for value in &values {
                add_value(&mut draft.attributes, id, value)?;
            }
            println!("added attribute {} ({id})", name.trim());
        }
        AttributeCommands::Rename {
            attribute,
            new_name,
        } => {
            let id = resolve(draft, &attribute)?;
            let Some(plan) = plan_rename(&draft.attributes, id, &new_name)? else {
                println!("name unchanged");
                return Ok(false);
            };
            let rows = apply_rename(&plan, &mut draft.attributes, &mut draft.variants)?;
            println!("renamed '{}' to '{}' on {rows} variants", plan.from, plan.to);
        }
        AttributeCommands::Remove { attribute } => {
            let id = resolve(draft, &attribute)?;
            let removed = remove_attribute(&mut draft.attributes, &mut draft.variants, id)?;
            println!("removed attribute {}", removed.key());
        }
        AttributeCommands::AddValue { attribute, value } => {
            let id = resolve(draft, &attribute)?;
            if !add_value(&mut draft.attributes, id, &value)? {
                println!("'{}' is blank or already present", value.trim());
                return Ok(false);
            }
            println!("added value {}", value.trim());
        }
        AttributeCommands::RemoveValue { attribute, value } => {
            let id = resolve(draft, &attribute)?;
            if !remove_value(&mut draft.attributes, id, &value)? {
                println!("'{value}' not found");
                return Ok(false);
            }
            println!("removed value {value}; run `generate` to drop its variants");
        }
    }
    Ok(true)
}

fn resolve(draft: &ProductDraft, id_or_name: &str) -> anyhow::Result<AttributeId> {
    draft
        .find_attribute(id_or_name)
        .map(|attr| attr.id)
        .ok_or_else(|| anyhow::anyhow!("attribute '{id_or_name}' not found"))
}
