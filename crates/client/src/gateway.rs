//! Gateway traits: the seams between state containers and the wire.
//!
//! The session containers are generic over these traits rather than holding
//! an [`ApiClient`] directly, so tests can drive them with in-memory fakes
//! and the composition root decides what actually goes over the network.

use secrecy::SecretString;
use serde::Serialize;
use thread_saints_core::{CartItemId, ProductId, WishlistItemId};
use tracing::instrument;

use crate::auth::Credential;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Cart, Identity, Wishlist};

/// Remote auth endpoints.
pub trait AuthGateway {
    /// Exchange credentials for a token and identity.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Credential, ApiError>> + Send;

    /// Create an account; the backend logs the user straight in.
    fn signup(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Credential, ApiError>> + Send;
}

/// Remote cart endpoints. Every mutator returns the full replacement
/// snapshot from the server.
pub trait CartGateway {
    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, ApiError>> + Send;

    fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
        size: Option<&str>,
    ) -> impl Future<Output = Result<Cart, ApiError>> + Send;

    fn update_cart_item(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, ApiError>> + Send;

    fn remove_cart_item(
        &self,
        item_id: &CartItemId,
    ) -> impl Future<Output = Result<Cart, ApiError>> + Send;

    fn clear_cart(&self) -> impl Future<Output = Result<Cart, ApiError>> + Send;
}

/// Remote wishlist endpoints, same replacement contract as the cart.
pub trait WishlistGateway {
    fn fetch_wishlist(&self) -> impl Future<Output = Result<Wishlist, ApiError>> + Send;

    fn add_to_wishlist(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Wishlist, ApiError>> + Send;

    fn remove_wishlist_item(
        &self,
        item_id: &WishlistItemId,
    ) -> impl Future<Output = Result<Wishlist, ApiError>> + Send;

    fn clear_wishlist(&self) -> impl Future<Output = Result<Wishlist, ApiError>> + Send;
}

// =============================================================================
// ApiClient implementations
// =============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartRequest<'a> {
    product_id: &'a ProductId,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
}

#[derive(Serialize)]
struct UpdateCartItemRequest {
    quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToWishlistRequest<'a> {
    product_id: &'a ProductId,
}

impl ApiClient {
    /// Auth endpoints return `{ success, token, user, message? }` with the
    /// token and identity at the top level rather than under a resource key.
    async fn auth_call(&self, url: &str, email: &str, password: &str) -> Result<Credential, ApiError> {
        let req = self.post(url).json(&LoginRequest { email, password });
        let mut envelope = self.send(req).await?;

        let token: String = envelope.take("token")?;
        let identity: Identity = envelope.take("user")?;

        Ok(Credential::new(SecretString::from(token), identity))
    }
}

impl AuthGateway for ApiClient {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        self.auth_call(&self.endpoints().login(), email, password).await
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn signup(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        self.auth_call(&self.endpoints().signup(), email, password).await
    }
}

impl CartGateway for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        let req = self.get(&self.endpoints().cart());
        self.send_expecting(req, "cart").await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<Cart, ApiError> {
        let req = self.post(&self.endpoints().cart_add()).json(&AddToCartRequest {
            product_id,
            quantity,
            size,
        });
        self.send_expecting(req, "cart").await
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    async fn update_cart_item(&self, item_id: &CartItemId, quantity: u32) -> Result<Cart, ApiError> {
        let req = self
            .put(&self.endpoints().cart_item(item_id))
            .json(&UpdateCartItemRequest { quantity });
        self.send_expecting(req, "cart").await
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    async fn remove_cart_item(&self, item_id: &CartItemId) -> Result<Cart, ApiError> {
        let req = self.delete(&self.endpoints().cart_item(item_id));
        self.send_expecting(req, "cart").await
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<Cart, ApiError> {
        let req = self.delete(&self.endpoints().cart_clear());
        self.send_expecting(req, "cart").await
    }
}

impl WishlistGateway for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_wishlist(&self) -> Result<Wishlist, ApiError> {
        let req = self.get(&self.endpoints().wishlist());
        self.send_expecting(req, "wishlist").await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn add_to_wishlist(&self, product_id: &ProductId) -> Result<Wishlist, ApiError> {
        let req = self
            .post(&self.endpoints().wishlist_add())
            .json(&AddToWishlistRequest { product_id });
        self.send_expecting(req, "wishlist").await
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    async fn remove_wishlist_item(&self, item_id: &WishlistItemId) -> Result<Wishlist, ApiError> {
        let req = self.delete(&self.endpoints().wishlist_item(item_id));
        self.send_expecting(req, "wishlist").await
    }

    #[instrument(skip(self))]
    async fn clear_wishlist(&self) -> Result<Wishlist, ApiError> {
        let req = self.delete(&self.endpoints().wishlist_clear());
        self.send_expecting(req, "wishlist").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_request_shape() {
        let req = AddToCartRequest {
            product_id: &ProductId::new("p1"),
            quantity: 2,
            size: Some("M"),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["size"], "M");
    }

    #[test]
    fn test_add_to_cart_request_omits_absent_size() {
        let req = AddToCartRequest {
            product_id: &ProductId::new("p1"),
            quantity: 1,
            size: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("size").is_none());
    }

    #[test]
    fn test_wishlist_request_shape() {
        let req = AddToWishlistRequest {
            product_id: &ProductId::new("p9"),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["productId"], "p9");
    }
}
