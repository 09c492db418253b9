//! Catalog models: products, categories, and product references.

use serde::{Deserialize, Serialize};
use thread_saints_core::{CategoryId, Price, ProductId};

/// A product as the backend returns it.
///
/// Read-only on the client: never constructed or mutated here, only rendered
/// and referenced by id in cart/wishlist/order calls. Admin CRUD goes through
/// [`crate::admin`], which submits form payloads and takes the server's word
/// for the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Price>,
    /// Hosted image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category name (denormalized by the backend).
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub washing_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    /// The price a buyer currently pays (sale price when one is set).
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.sale_price.unwrap_or(self.price)
    }
}

const fn default_true() -> bool {
    true
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A reference to a product inside a collection item.
///
/// The backend is inconsistent about population: depending on the endpoint,
/// `item.product` arrives either as a bare id string or as the expanded
/// product object. Both shapes are accepted and compared by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(ProductId),
    Full(Box<Product>),
}

impl ProductRef {
    /// The referenced product's id, whichever shape arrived.
    #[must_use]
    pub fn id(&self) -> &ProductId {
        match self {
            Self::Id(id) => id,
            Self::Full(product) => &product.id,
        }
    }

    /// The expanded product, when the backend populated it.
    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        match self {
            Self::Id(_) => None,
            Self::Full(product) => Some(product),
        }
    }
}
