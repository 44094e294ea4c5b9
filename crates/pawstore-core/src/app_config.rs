use crate::products::DEFAULT_SKU_PATTERN;

/// Upper bound on the number of variant rows a single generation may produce.
pub const DEFAULT_MAX_COMBINATIONS: usize = 200;

/// Upper bound on attribute definitions per product.
pub const DEFAULT_MAX_ATTRIBUTES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The fixed attribute fields the persistence backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeRole {
    Size,
    Color,
    Material,
}

impl std::fmt::Display for AttributeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeRole::Size => write!(f, "size"),
            AttributeRole::Color => write!(f, "color"),
            AttributeRole::Material => write!(f, "material"),
        }
    }
}

/// Attribute names recognized as one of the backend's fixed fields.
///
/// Matching is on the trimmed name, case-insensitively. The color list also
/// decides which attribute drives per-color image assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeVocabulary {
    pub size: Vec<String>,
    pub color: Vec<String>,
    pub material: Vec<String>,
}

impl AttributeVocabulary {
    /// Returns the backend field an attribute name maps to, if any.
    #[must_use]
    pub fn role_of(&self, name: &str) -> Option<AttributeRole> {
        if name_matches(&self.size, name) {
            Some(AttributeRole::Size)
        } else if name_matches(&self.color, name) {
            Some(AttributeRole::Color)
        } else if name_matches(&self.material, name) {
            Some(AttributeRole::Material)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_color(&self, name: &str) -> bool {
        name_matches(&self.color, name)
    }
}

impl Default for AttributeVocabulary {
    fn default() -> Self {
        Self {
            size: to_owned_list(&["size", "kích thước", "kích cỡ", "cỡ"]),
            color: to_owned_list(&["color", "colour", "màu", "màu sắc"]),
            material: to_owned_list(&["material", "chất liệu"]),
        }
    }
}

fn name_matches(synonyms: &[String], name: &str) -> bool {
    let needle = name.trim().to_lowercase();
    !needle.is_empty()
        && synonyms
            .iter()
            .any(|s| s.trim().to_lowercase() == needle)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub max_combinations: usize,
    pub max_attributes: usize,
    pub sku_pattern: String,
    pub vocabulary: AttributeVocabulary,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            log_level: "info".to_string(),
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            sku_pattern: DEFAULT_SKU_PATTERN.to_string(),
            vocabulary: AttributeVocabulary::default(),
        }
    }
}
