//! Wishlist snapshot models.

use serde::{Deserialize, Serialize};
use thread_saints_core::{ProductId, WishlistId, WishlistItemId};

use super::catalog::ProductRef;

/// The server-owned wishlist snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(rename = "_id")]
    pub id: WishlistId,
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Number of saved items (quantity is implicitly one).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }

    /// Whether any item references the given product, in either reference
    /// shape the backend emits (bare id or expanded object).
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| item.product.id() == product_id)
    }
}

/// A saved item: nothing beyond the product reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(rename = "_id")]
    pub id: WishlistItemId,
    pub product: ProductRef,
}
