use thiserror::Error;

/// Recoverable failures of attribute editing and generation. None of these
/// leave the draft partially modified.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("no attribute has both a name and at least one value; nothing to generate")]
    NoEligibleAttributes,

    #[error("{count} combinations exceed the limit of {max}; remove some attribute values")]
    TooManyCombinations { count: usize, max: usize },

    #[error("a product can have at most {max} attributes")]
    TooManyAttributes { max: usize },

    #[error("attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("rename of attribute '{expected}' is stale; it is now named '{actual}'")]
    StaleRename { expected: String, actual: String },

    #[error("no color attribute is defined; per-color images are unavailable")]
    NoColorAttribute,
}

/// The first rule a draft breaks. `Display` is the message shown to the admin.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("product name is required")]
    NameRequired,

    #[error("product slug is required")]
    SlugRequired,

    #[error("a category must be selected")]
    CategoryRequired,

    #[error("at least one product image is required")]
    ImageRequired,

    #[error("shipping {field} must be a number greater than or equal to 0")]
    InvalidDimension { field: &'static str },

    #[error("SKU is required")]
    SkuRequired,

    #[error("price must be a number greater than 0")]
    InvalidPrice,

    #[error("stock must be a number greater than or equal to 0")]
    InvalidStock,

    #[error("add at least one attribute before saving variants")]
    NoAttributes,

    #[error("attribute #{position} needs a name")]
    AttributeNameRequired { position: usize },

    #[error("attribute '{name}' needs at least one value")]
    AttributeValuesRequired { name: String },

    #[error("attribute name '{name}' is used more than once")]
    DuplicateAttributeName { name: String },

    #[error("generate at least one variant")]
    NoVariants,

    #[error("variant #{row} is missing a SKU")]
    VariantSkuRequired { row: usize },

    #[error("SKU '{sku}' is used by more than one variant")]
    DuplicateSku { sku: String },

    #[error("variant '{sku}' price must be a number greater than 0")]
    InvalidVariantPrice { sku: String },

    #[error("variant '{sku}' stock must be a number greater than or equal to 0")]
    InvalidVariantStock { sku: String },

    #[error("variant '{sku}' has no value for attribute '{attribute}'")]
    MissingAttributeValue { sku: String, attribute: String },

    #[error("more than one variant has the combination {key}")]
    DuplicateCombination { key: String },
}
