pub mod app_config;
pub mod attribute_map;
pub mod config;
pub mod drafts;
pub mod error;
pub mod products;

pub use app_config::{AppConfig, AttributeRole, AttributeVocabulary, Environment};
pub use attribute_map::AttributeMap;
pub use config::{load_app_config, load_app_config_from_env};
pub use drafts::{load_draft, save_draft};
pub use error::{ConfigError, DraftFileError};
pub use products::{
    AttributeDefinition, AttributeId, ProductDraft, ShippingDimensions, VariantId, VariantImage,
    VariantRow, VariantStatus, DEFAULT_SKU_PATTERN,
};
