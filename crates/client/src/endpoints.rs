//! Centralized endpoint-URL table.
//!
//! One method per backend route, all derived from the configured base URL.
//! Keeping the table in one place means a route change touches exactly one
//! line, and the rest of the crate never concatenates URL strings.

use thread_saints_core::{CartItemId, CategoryId, OrderId, ProductId, WishlistItemId};
use url::Url;

/// The store API's endpoint table.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Build the table from the API base URL (e.g. `http://localhost:5000`).
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    /// The configured base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn join(&self, path: &str) -> String {
        // The base is validated at config load; a trailing slash on the base
        // or a missing leading slash here would silently change the route.
        format!("{}{path}", self.base.as_str().trim_end_matches('/'))
    }

    // Auth

    #[must_use]
    pub fn login(&self) -> String {
        self.join("/api/auth/login")
    }

    #[must_use]
    pub fn signup(&self) -> String {
        self.join("/api/auth/signup")
    }

    // Cart

    #[must_use]
    pub fn cart(&self) -> String {
        self.join("/api/cart")
    }

    #[must_use]
    pub fn cart_add(&self) -> String {
        self.join("/api/cart/add")
    }

    #[must_use]
    pub fn cart_item(&self, item_id: &CartItemId) -> String {
        self.join(&format!("/api/cart/item/{item_id}"))
    }

    #[must_use]
    pub fn cart_clear(&self) -> String {
        self.join("/api/cart/clear")
    }

    // Wishlist

    #[must_use]
    pub fn wishlist(&self) -> String {
        self.join("/api/wishlist")
    }

    #[must_use]
    pub fn wishlist_add(&self) -> String {
        self.join("/api/wishlist/add")
    }

    #[must_use]
    pub fn wishlist_item(&self, item_id: &WishlistItemId) -> String {
        self.join(&format!("/api/wishlist/item/{item_id}"))
    }

    #[must_use]
    pub fn wishlist_clear(&self) -> String {
        self.join("/api/wishlist/clear")
    }

    // Catalog (also the admin CRUD routes)

    #[must_use]
    pub fn products(&self) -> String {
        self.join("/api/products")
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> String {
        self.join(&format!("/api/products/{id}"))
    }

    #[must_use]
    pub fn categories(&self) -> String {
        self.join("/api/categories")
    }

    #[must_use]
    pub fn category(&self, id: &CategoryId) -> String {
        self.join(&format!("/api/categories/{id}"))
    }

    // Orders & payment

    #[must_use]
    pub fn orders(&self) -> String {
        self.join("/api/orders")
    }

    #[must_use]
    pub fn order(&self, id: &OrderId) -> String {
        self.join(&format!("/api/orders/{id}"))
    }

    #[must_use]
    pub fn payment_key(&self) -> String {
        self.join("/api/payment/key")
    }

    #[must_use]
    pub fn payment_verify(&self) -> String {
        self.join("/api/payment/verify")
    }

    // Image upload

    #[must_use]
    pub fn upload_single(&self) -> String {
        self.join("/api/upload/single")
    }

    #[must_use]
    pub fn upload_multiple(&self) -> String {
        self.join("/api/upload/multiple")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn table() -> Endpoints {
        Endpoints::new(Url::parse("http://localhost:5000").unwrap())
    }

    #[test]
    fn test_static_routes() {
        let e = table();
        assert_eq!(e.login(), "http://localhost:5000/api/auth/login");
        assert_eq!(e.cart_add(), "http://localhost:5000/api/cart/add");
        assert_eq!(e.wishlist_clear(), "http://localhost:5000/api/wishlist/clear");
        assert_eq!(e.payment_key(), "http://localhost:5000/api/payment/key");
    }

    #[test]
    fn test_parameterized_routes() {
        let e = table();
        assert_eq!(
            e.cart_item(&CartItemId::new("abc123")),
            "http://localhost:5000/api/cart/item/abc123"
        );
        assert_eq!(
            e.product(&ProductId::new("665f1c2a")),
            "http://localhost:5000/api/products/665f1c2a"
        );
    }

    #[test]
    fn test_trailing_slash_base() {
        let e = Endpoints::new(Url::parse("https://api.threadsaints.in/").unwrap());
        assert_eq!(e.products(), "https://api.threadsaints.in/api/products");
    }
}
