//! `bulk` sub-commands. Without `--select` every row is edited, except for
//! `delete`, which requires explicit ids.

use clap::{Subcommand, ValueEnum};
use pawstore_core::{ProductDraft, VariantId, VariantStatus};
use pawstore_variants::bulk::{
    adjust_price_percent, reapply_sku_pattern, remove_variants, set_field, set_status,
};
use pawstore_variants::{BulkField, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    Price,
    CostPrice,
    Stock,
}

impl From<FieldArg> for BulkField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Price => BulkField::Price,
            FieldArg::CostPrice => BulkField::CostPrice,
            FieldArg::Stock => BulkField::Stock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for VariantStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => VariantStatus::Active,
            StatusArg::Inactive => VariantStatus::Inactive,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum BulkCommands {
    /// Overwrite price, cost price, or stock with the same text
    SetField {
        field: FieldArg,
        value: String,
        /// Variant id to edit (repeatable)
        #[arg(long = "select")]
        select: Vec<VariantId>,
    },
    /// Raise or lower prices by a percentage (e.g. 10 or -25)
    AdjustPrice {
        #[arg(allow_negative_numbers = true)]
        percent: f64,
        #[arg(long = "select")]
        select: Vec<VariantId>,
    },
    /// Recompute SKUs from the draft's SKU pattern
    ReapplySku {
        #[arg(long = "select")]
        select: Vec<VariantId>,
    },
    /// Activate or deactivate variants
    Status {
        status: StatusArg,
        #[arg(long = "select")]
        select: Vec<VariantId>,
    },
    /// Delete the selected variants
    Delete {
        #[arg(long = "select", required = true)]
        select: Vec<VariantId>,
    },
}

pub(crate) fn run(command: BulkCommands, draft: &mut ProductDraft) -> bool {
    let changed = match command {
        BulkCommands::SetField {
            field,
            value,
            select,
        } => {
            let selection: Selection = select.into_iter().collect();
            set_field(&mut draft.variants, &selection, field.into(), &value)
        }
        BulkCommands::AdjustPrice { percent, select } => {
            let selection: Selection = select.into_iter().collect();
            adjust_price_percent(&mut draft.variants, &selection, percent)
        }
        BulkCommands::ReapplySku { select } => {
            let selection: Selection = select.into_iter().collect();
            let code = draft.product_code().to_string();
            reapply_sku_pattern(&mut draft.variants, &selection, &draft.sku_pattern, &code)
        }
        BulkCommands::Status { status, select } => {
            let selection: Selection = select.into_iter().collect();
            set_status(&mut draft.variants, &selection, status.into())
        }
        BulkCommands::Delete { select } => remove_variants(&mut draft.variants, &select),
    };

    println!("{changed} variants changed");
    changed > 0
}
