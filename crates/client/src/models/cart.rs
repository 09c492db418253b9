//! Cart snapshot models.

use serde::{Deserialize, Serialize};
use thread_saints_core::{CartId, CartItemId, Price};

use super::catalog::ProductRef;

/// The server-owned cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: CartId,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Sum of item quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum over items of unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(|item| item.price * item.quantity).sum()
    }
}

/// A line in the cart. Name, image and price are denormalized snapshots the
/// backend took at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: CartItemId,
    pub product: ProductRef,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}
