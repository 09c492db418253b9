//! The cart session: a [`SessionMirror`] over the server-owned cart.
//!
//! Every mutator forwards to the backend and, only on success, installs the
//! full replacement snapshot the server returned. There is no optimistic
//! update and no local patching: a failed call leaves the visible cart
//! exactly as it was and returns the error for the caller to surface.

use thread_saints_core::{CartItemId, Price, ProductId};
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::CartGateway;
use crate::models::Cart;
use crate::session::{SessionMirror, SyncState};

/// Client-side mirror of the logged-in user's cart.
#[derive(Debug)]
pub struct CartSession<G: CartGateway> {
    gateway: G,
    mirror: SessionMirror<Cart>,
}

impl<G: CartGateway> CartSession<G> {
    /// A cart session with no credential and no snapshot.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            mirror: SessionMirror::new(),
        }
    }

    /// Current synchronization state.
    #[must_use]
    pub const fn state(&self) -> SyncState {
        self.mirror.state()
    }

    /// The last server snapshot, if one has been loaded.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Cart> {
        self.mirror.snapshot()
    }

    /// Sum of item quantities; zero while no snapshot is loaded.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.mirror.snapshot().map_or(0, Cart::item_count)
    }

    /// Items subtotal; zero while no snapshot is loaded.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.mirror.snapshot().map_or_else(Price::zero, Cart::subtotal)
    }

    /// Fetch the cart from the server, replacing the snapshot on success.
    ///
    /// Called by the composition root whenever a credential becomes
    /// available. On failure any previous snapshot stays visible and the
    /// error is returned rather than recorded.
    ///
    /// # Errors
    ///
    /// Whatever the fetch produced.
    #[instrument(skip_all)]
    pub async fn sync(&mut self) -> Result<(), ApiError> {
        let token = self.mirror.begin_fetch();
        match self.gateway.fetch_cart().await {
            Ok(cart) => {
                self.mirror.complete_fetch(token, Some(cart));
                Ok(())
            }
            Err(e) => {
                self.mirror.complete_fetch(token, None);
                Err(e)
            }
        }
    }

    /// Add a product; the server decides merging and returns the new cart.
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<(), ApiError> {
        let cart = self.gateway.add_to_cart(product_id, quantity, size).await?;
        self.mirror.install(cart);
        Ok(())
    }

    /// Set an item's quantity.
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_item(
        &mut self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let cart = self.gateway.update_cart_item(item_id, quantity).await?;
        self.mirror.install(cart);
        Ok(())
    }

    /// Remove one line from the cart.
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_item(&mut self, item_id: &CartItemId) -> Result<(), ApiError> {
        let cart = self.gateway.remove_cart_item(item_id).await?;
        self.mirror.install(cart);
        Ok(())
    }

    /// Empty the cart server-side.
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error.
    #[instrument(skip_all)]
    pub async fn clear(&mut self) -> Result<(), ApiError> {
        let cart = self.gateway.clear_cart().await?;
        self.mirror.install(cart);
        Ok(())
    }

    /// The credential went away: drop the snapshot and invalidate any fetch
    /// still in flight.
    pub fn reset(&mut self) {
        self.mirror.reset();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::models::{CartItem, ProductRef};
    use thread_saints_core::CartId;

    /// Pops a scripted response per call, regardless of which method fired.
    struct FakeCart {
        responses: Mutex<VecDeque<Result<Cart, ApiError>>>,
    }

    impl FakeCart {
        fn scripted(responses: Vec<Result<Cart, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }

        fn next(&self) -> Result<Cart, ApiError> {
            self.responses.lock().unwrap().pop_front().unwrap()
        }
    }

    impl CartGateway for FakeCart {
        async fn fetch_cart(&self) -> Result<Cart, ApiError> {
            self.next()
        }

        async fn add_to_cart(
            &self,
            _product_id: &ProductId,
            _quantity: u32,
            _size: Option<&str>,
        ) -> Result<Cart, ApiError> {
            self.next()
        }

        async fn update_cart_item(
            &self,
            _item_id: &CartItemId,
            _quantity: u32,
        ) -> Result<Cart, ApiError> {
            self.next()
        }

        async fn remove_cart_item(&self, _item_id: &CartItemId) -> Result<Cart, ApiError> {
            self.next()
        }

        async fn clear_cart(&self) -> Result<Cart, ApiError> {
            self.next()
        }
    }

    fn cart_with(quantity: u32) -> Cart {
        Cart {
            id: CartId::new("c1"),
            items: vec![CartItem {
                id: CartItemId::new("i1"),
                product: ProductRef::Id(ProductId::new("p1")),
                name: "Oversized Saint Tee".to_owned(),
                image: None,
                price: Price::from_rupees(999),
                quantity,
                size: Some("M".to_owned()),
            }],
        }
    }

    fn rejected() -> ApiError {
        ApiError::Rejected("Item not found".to_owned())
    }

    #[tokio::test]
    async fn test_sync_installs_snapshot() {
        let mut session = CartSession::new(FakeCart::scripted(vec![Ok(cart_with(2))]));
        assert_eq!(session.state(), SyncState::Unauthenticated);

        session.sync().await.unwrap();

        assert_eq!(session.state(), SyncState::Ready);
        assert_eq!(session.item_count(), 2);
        assert_eq!(session.subtotal(), Price::from_rupees(1998));
    }

    #[tokio::test]
    async fn test_failed_sync_keeps_prior_snapshot() {
        let mut session =
            CartSession::new(FakeCart::scripted(vec![Ok(cart_with(1)), Err(rejected())]));
        session.sync().await.unwrap();

        let err = session.sync().await.unwrap_err();
        assert_eq!(err.to_string(), "Item not found");
        assert_eq!(session.state(), SyncState::Ready);
        assert_eq!(session.item_count(), 1);
    }

    #[tokio::test]
    async fn test_mutation_replaces_snapshot_wholesale() {
        let mut session =
            CartSession::new(FakeCart::scripted(vec![Ok(cart_with(1)), Ok(cart_with(5))]));
        session.sync().await.unwrap();

        session.add(&ProductId::new("p1"), 4, Some("M")).await.unwrap();
        assert_eq!(session.item_count(), 5);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_snapshot_untouched() {
        let mut session =
            CartSession::new(FakeCart::scripted(vec![Ok(cart_with(3)), Err(rejected())]));
        session.sync().await.unwrap();

        let err = session.update_item(&CartItemId::new("i1"), 9).await.unwrap_err();
        assert_eq!(err.to_string(), "Item not found");
        assert_eq!(session.item_count(), 3);
        assert_eq!(session.state(), SyncState::Ready);
    }

    #[tokio::test]
    async fn test_reset_discards_snapshot() {
        let mut session = CartSession::new(FakeCart::scripted(vec![Ok(cart_with(2))]));
        session.sync().await.unwrap();

        session.reset();

        assert_eq!(session.state(), SyncState::Unauthenticated);
        assert!(session.snapshot().is_none());
        assert_eq!(session.item_count(), 0);
        assert_eq!(session.subtotal(), Price::zero());
    }

    #[tokio::test]
    async fn test_derived_accessors_before_any_sync() {
        let session = CartSession::new(FakeCart::scripted(vec![]));
        assert_eq!(session.item_count(), 0);
        assert_eq!(session.subtotal(), Price::zero());
    }
}
