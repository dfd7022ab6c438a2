use serde::{Deserialize, Serialize};

/// Unique identifier of a product in the catalog
pub type ProductId = String;

/// A catalog product as delivered by the remote content store.
///
/// Values arrive fully formed; the runtime consumes them as-is and performs
/// no shape validation of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency
    pub price: f64,
    pub category: String,
    /// Image reference (URL or asset key)
    pub image: String,
    /// Optional model/variant label ("Pro", "2024", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Site-wide configuration values served by the remote content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub store_name: String,
    /// ISO currency code used for price display
    pub currency: String,
    #[serde(default)]
    pub support_email: String,
}

impl SiteConfig {
    pub fn new(store_name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            currency: currency.into(),
            support_email: String::new(),
        }
    }
}
