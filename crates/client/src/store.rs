//! The composition root wiring credentials to session mirrors.
//!
//! [`Storefront`] owns the gateway client, the credential holder, and both
//! session containers, and enforces the ordering the pieces rely on:
//!
//! - after any credential becomes available (login, signup, restore) both
//!   mirrors re-fetch, with the token already installed in the slot;
//! - on logout both mirrors reset immediately, no server round-trip;
//! - an `Unauthorized` coming back from any session call means the token
//!   expired server-side, and is treated as a logout.
//!
//! The struct is generic over the gateway traits so the wiring itself is
//! testable against in-memory fakes; `Storefront::new` assembles the real
//! thing over [`ApiClient`] and [`FileCredentialStore`].

use thread_saints_core::{CartItemId, OrderId, ProductId, WishlistItemId};
use tracing::{instrument, warn};

use crate::auth::{CredentialHolder, CredentialStore, FileCredentialStore};
use crate::cart::CartSession;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::gateway::{AuthGateway, CartGateway, WishlistGateway};
use crate::http::{ApiClient, TokenSlot};
use crate::models::{Category, Identity, Order, PaymentConfirmation, Product, ShippingAddress};
use crate::orders::CheckoutResponse;
use crate::wishlist::WishlistSession;

/// The assembled client: credential, cart, wishlist, catalog, orders.
pub struct Storefront<C = ApiClient, S = FileCredentialStore>
where
    C: CartGateway + WishlistGateway,
    S: CredentialStore,
{
    client: C,
    credentials: CredentialHolder<S>,
    cart: CartSession<C>,
    wishlist: WishlistSession<C>,
}

impl Storefront {
    /// Assemble a storefront from configuration. No network traffic happens
    /// until the first call.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = ApiClient::new(config)?;
        let token_slot = client.token_slot().clone();
        Ok(Self::assemble(
            client,
            FileCredentialStore::new(config.credential_file.clone()),
            token_slot,
        ))
    }
}

impl<C, S> Storefront<C, S>
where
    C: AuthGateway + CartGateway + WishlistGateway + Clone,
    S: CredentialStore,
{
    /// Wire a storefront from its parts. The token slot must be the one the
    /// client reads on every request.
    pub fn assemble(client: C, store: S, token_slot: TokenSlot) -> Self {
        Self {
            credentials: CredentialHolder::new(store, token_slot),
            cart: CartSession::new(client.clone()),
            wishlist: WishlistSession::new(client.clone()),
            client,
        }
    }

    /// The underlying gateway client, for calls that need no session state.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// The cart mirror.
    #[must_use]
    pub const fn cart(&self) -> &CartSession<C> {
        &self.cart
    }

    /// The wishlist mirror.
    #[must_use]
    pub const fn wishlist(&self) -> &WishlistSession<C> {
        &self.wishlist
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// The logged-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.credentials.identity()
    }

    // -------------------------------------------------------------------------
    // Session lifecycle
    // -------------------------------------------------------------------------

    /// Restore a persisted credential and, if one was found, re-sync both
    /// mirrors. Called once at startup; never fails, only logs.
    #[instrument(skip_all)]
    pub async fn restore(&mut self) {
        if self.credentials.restore() {
            self.sync_sessions().await;
        }
    }

    /// Log in and re-sync both mirrors.
    ///
    /// The credential is adopted as soon as the auth call succeeds; a
    /// subsequent sync failure is logged but does not undo the login.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed email or empty password, otherwise the
    /// auth call's error.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        self.credentials.login(&self.client, email, password).await?;
        self.sync_sessions().await;
        Ok(())
    }

    /// Create an account (the backend logs the user straight in) and re-sync
    /// both mirrors.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::login`].
    #[instrument(skip_all, fields(email = %email))]
    pub async fn signup(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        self.credentials.signup(&self.client, email, password).await?;
        self.sync_sessions().await;
        Ok(())
    }

    /// End the session: token, persisted credential, and both snapshots all
    /// go at once. Purely local.
    pub fn logout(&mut self) {
        self.credentials.logout();
        self.cart.reset();
        self.wishlist.reset();
    }

    async fn sync_sessions(&mut self) {
        if let Err(e) = self.cart.sync().await {
            if self.expire_if_unauthorized(&e) {
                return;
            }
            warn!(error = %e, "cart sync failed");
        }
        if let Err(e) = self.wishlist.sync().await {
            if !self.expire_if_unauthorized(&e) {
                warn!(error = %e, "wishlist sync failed");
            }
        }
    }

    /// A 401 on a session call means the token is no longer honored.
    fn expire_if_unauthorized(&mut self, error: &ApiError) -> bool {
        if error.is_unauthorized() {
            warn!("session expired, logging out");
            self.logout();
            true
        } else {
            false
        }
    }

    fn settle<T>(&mut self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(e) = &result {
            self.expire_if_unauthorized(e);
        }
        result
    }

    // -------------------------------------------------------------------------
    // Cart and wishlist, with expiry handling
    // -------------------------------------------------------------------------

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error; `Unauthorized` also ends the
    /// session.
    pub async fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<(), ApiError> {
        let result = self.cart.add(product_id, quantity, size).await;
        self.settle(result)
    }

    /// Set a cart line's quantity.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::add_to_cart`].
    pub async fn update_cart_item(
        &mut self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let result = self.cart.update_item(item_id, quantity).await;
        self.settle(result)
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::add_to_cart`].
    pub async fn remove_cart_item(&mut self, item_id: &CartItemId) -> Result<(), ApiError> {
        let result = self.cart.remove_item(item_id).await;
        self.settle(result)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::add_to_cart`].
    pub async fn clear_cart(&mut self) -> Result<(), ApiError> {
        let result = self.cart.clear().await;
        self.settle(result)
    }

    /// Save a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::add_to_cart`].
    pub async fn add_to_wishlist(&mut self, product_id: &ProductId) -> Result<(), ApiError> {
        let result = self.wishlist.add(product_id).await;
        self.settle(result)
    }

    /// Remove a saved wishlist item.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::add_to_cart`].
    pub async fn remove_wishlist_item(
        &mut self,
        item_id: &WishlistItemId,
    ) -> Result<(), ApiError> {
        let result = self.wishlist.remove_item(item_id).await;
        self.settle(result)
    }

    /// Empty the wishlist.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::add_to_cart`].
    pub async fn clear_wishlist(&mut self) -> Result<(), ApiError> {
        let result = self.wishlist.clear().await;
        self.settle(result)
    }
}

// Catalog, checkout, and order history go straight to the HTTP client; they
// are only available on the real assembly.
impl<S: CredentialStore> Storefront<ApiClient, S> {
    /// All active products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.client.products().await
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// `Rejected` when the id is unknown.
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.client.product_by_id(id).await
    }

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.categories().await
    }

    /// Create an order from the current cart snapshot.
    ///
    /// # Errors
    ///
    /// `Validation` when no cart is loaded, it is empty, or the address has
    /// a blank field; `Unauthorized` also ends the session.
    #[instrument(skip_all)]
    pub async fn checkout(
        &mut self,
        address: &ShippingAddress,
    ) -> Result<CheckoutResponse, ApiError> {
        let Some(cart) = self.cart.snapshot().cloned() else {
            return Err(ApiError::Validation("cart is empty".to_owned()));
        };
        let result = self.client.create_order(&cart, address).await;
        self.settle(result)
    }

    /// Relay payment capture identifiers for verification, then re-sync the
    /// cart (the backend empties it once the order is paid).
    ///
    /// # Errors
    ///
    /// `Rejected` when verification fails; the order stays unpaid.
    #[instrument(skip_all, fields(order_id = %confirmation.order_id))]
    pub async fn confirm_payment(
        &mut self,
        confirmation: &PaymentConfirmation,
    ) -> Result<Option<String>, ApiError> {
        let message = self.client.verify_payment(confirmation).await?;
        if let Err(e) = self.cart.sync().await
            && !self.expire_if_unauthorized(&e)
        {
            warn!(error = %e, "cart re-sync after payment failed");
        }
        Ok(message)
    }

    /// The logged-in user's orders.
    ///
    /// # Errors
    ///
    /// `Unauthorized` also ends the session.
    pub async fn my_orders(&mut self) -> Result<Vec<Order>, ApiError> {
        let result = self.client.list_orders().await;
        self.settle(result)
    }

    /// A single order by id.
    ///
    /// # Errors
    ///
    /// `Unauthorized` also ends the session.
    pub async fn order(&mut self, id: &OrderId) -> Result<Order, ApiError> {
        let result = self.client.order_by_id(id).await;
        self.settle(result)
    }
}

impl<C, S> std::fmt::Debug for Storefront<C, S>
where
    C: CartGateway + WishlistGateway,
    S: CredentialStore,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("authenticated", &self.credentials.is_authenticated())
            .field("cart_state", &self.cart.state())
            .field("wishlist_state", &self.wishlist.state())
            .finish_non_exhaustive()
    }
}
