use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attribute_map::AttributeMap;

/// SKU pattern applied to new drafts: product code followed by the
/// variant's attribute values.
pub const DEFAULT_SKU_PATTERN: &str = "{CODE}-{ATTRS}";

/// Stable identifier of an [`AttributeDefinition`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(Uuid);

impl AttributeId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttributeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttributeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttributeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Stable identifier of a [`VariantRow`], independent of attribute ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(Uuid);

impl VariantId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VariantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VariantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A named axis of variation (e.g. `"Size"`) with its candidate values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    #[serde(default)]
    pub id: AttributeId,
    /// Display name; the trimmed form is the key into every
    /// [`VariantRow::attributes`] map.
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl AttributeDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AttributeId::new(),
            name: name.into(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: AttributeId::new(),
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The name as used for joins against variant attribute maps.
    #[must_use]
    pub fn key(&self) -> &str {
        self.name.trim()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for VariantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantStatus::Active => write!(f, "active"),
            VariantStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Image attached to a variant: either already hosted, or a local file that
/// still has to go through the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VariantImage {
    Remote { url: String },
    Local { path: PathBuf },
}

/// One sellable combination of a product.
///
/// Numeric fields are kept as the text the admin typed; they are only
/// interpreted at validation time so half-edited values survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRow {
    #[serde(default)]
    pub id: VariantId,
    #[serde(default)]
    pub attributes: AttributeMap,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub cost_price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub status: VariantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<VariantImage>,
}

impl VariantRow {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == VariantStatus::Active
    }

    #[must_use]
    pub fn combination_key(&self) -> String {
        self.attributes.combination_key()
    }
}

/// Parcel dimensions used by the shipping-rate collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingDimensions {
    /// Grams.
    #[serde(default)]
    pub weight: f64,
    /// Centimetres.
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl ShippingDimensions {
    /// Named fields in a fixed order, for validation and display.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("weight", self.weight),
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ]
    }
}

/// The product being edited in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub slug: String,
    pub category_id: Option<String>,
    pub description: Option<String>,
    /// Uploaded product image references.
    pub images: Vec<String>,
    /// Product code substituted for `{CODE}` in SKU patterns; the slug is
    /// used when blank.
    pub code: String,
    pub has_variants: bool,

    // Simple (no-variant) product fields.
    pub sku: String,
    pub price: String,
    pub cost_price: String,
    pub stock: String,
    pub manage_stock: bool,

    pub dimensions: ShippingDimensions,

    pub attributes: Vec<AttributeDefinition>,
    pub variants: Vec<VariantRow>,
    pub sku_pattern: String,
    pub manage_variant_stock: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            category_id: None,
            description: None,
            images: Vec::new(),
            code: String::new(),
            has_variants: false,
            sku: String::new(),
            price: String::new(),
            cost_price: String::new(),
            stock: String::new(),
            manage_stock: true,
            dimensions: ShippingDimensions::default(),
            attributes: Vec::new(),
            variants: Vec::new(),
            sku_pattern: DEFAULT_SKU_PATTERN.to_string(),
            manage_variant_stock: true,
        }
    }
}

impl ProductDraft {
    /// Code substituted for `{CODE}`: the explicit code, else the slug.
    #[must_use]
    pub fn product_code(&self) -> &str {
        let code = self.code.trim();
        if code.is_empty() {
            self.slug.trim()
        } else {
            code
        }
    }

    #[must_use]
    pub fn attribute(&self, id: AttributeId) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.id == id)
    }

    /// Looks an attribute up by id string or, failing that, by trimmed name
    /// (case-insensitive).
    #[must_use]
    pub fn find_attribute(&self, id_or_name: &str) -> Option<&AttributeDefinition> {
        if let Ok(id) = id_or_name.parse::<AttributeId>() {
            if let Some(attr) = self.attribute(id) {
                return Some(attr);
            }
        }
        let needle = id_or_name.trim().to_lowercase();
        self.attributes
            .iter()
            .find(|a| a.key().to_lowercase() == needle)
    }

    #[must_use]
    pub fn variant(&self, id: VariantId) -> Option<&VariantRow> {
        self.variants.iter().find(|v| v.id == id)
    }

    pub fn variant_mut(&mut self, id: VariantId) -> Option<&mut VariantRow> {
        self.variants.iter_mut().find(|v| v.id == id)
    }
}
