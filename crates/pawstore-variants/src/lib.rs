//! Variant matrix engine for the product admin form.
//!
//! Attribute definitions flow through [`generate`] into combinations, are
//! merged with the existing rows by [`reconcile`], and are then edited in
//! place by [`bulk`] and [`images`]. [`validate`] gates submission and
//! [`payload`] maps the result onto the backend's fixed attribute fields.

pub mod attributes;
pub mod bulk;
pub mod error;
pub mod generate;
pub mod images;
pub mod matrix;
pub mod payload;
pub mod reconcile;
pub mod sku;
pub mod text;
pub mod validate;

pub use bulk::{BulkField, Selection};
pub use error::{MatrixError, ValidationError};
pub use generate::{combination_count, generate};
pub use matrix::{
    assign_color_image, clear_color_image, generate_variants, GenerateSummary, MatrixSettings,
};
pub use payload::{build_payload, ProductPayload, VariantPayload};
pub use reconcile::{reconcile, NewVariantDefaults};
pub use sku::resolve_sku;
pub use validate::validate_draft;
