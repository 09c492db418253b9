//! The wishlist session: the second [`SessionMirror`] instantiation.
//!
//! Identical replacement contract to the cart, minus quantities: an item is
//! either saved or it is not, and `contains` answers by product id whichever
//! reference shape the backend returned.

use thread_saints_core::{ProductId, WishlistItemId};
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::WishlistGateway;
use crate::models::Wishlist;
use crate::session::{SessionMirror, SyncState};

/// Client-side mirror of the logged-in user's wishlist.
#[derive(Debug)]
pub struct WishlistSession<G: WishlistGateway> {
    gateway: G,
    mirror: SessionMirror<Wishlist>,
}

impl<G: WishlistGateway> WishlistSession<G> {
    /// A wishlist session with no credential and no snapshot.
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
    pub const fn snapshot(&self) -> Option<&Wishlist> {
        self.mirror.snapshot()
    }

    /// Number of saved items; zero while no snapshot is loaded.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.mirror.snapshot().map_or(0, Wishlist::item_count)
    }

    /// Whether the product is saved; `false` while no snapshot is loaded.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.mirror
            .snapshot()
            .is_some_and(|wishlist| wishlist.contains(product_id))
    }

    /// Fetch the wishlist, replacing the snapshot on success. Failure keeps
    /// any prior snapshot and returns the error.
    ///
    /// # Errors
    ///
    /// Whatever the fetch produced.
    #[instrument(skip_all)]
    pub async fn sync(&mut self) -> Result<(), ApiError> {
        let token = self.mirror.begin_fetch();
        match self.gateway.fetch_wishlist().await {
            Ok(wishlist) => {
                self.mirror.complete_fetch(token, Some(wishlist));
                Ok(())
            }
            Err(e) => {
                self.mirror.complete_fetch(token, None);
                Err(e)
            }
        }
    }

    /// Save a product. Adding one that is already saved is the server's call
    /// to reject; the snapshot is untouched either way until it answers.
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&mut self, product_id: &ProductId) -> Result<(), ApiError> {
        let wishlist = self.gateway.add_to_wishlist(product_id).await?;
        self.mirror.install(wishlist);
        Ok(())
    }

    /// Remove a saved item by its item id (not the product id).
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_item(&mut self, item_id: &WishlistItemId) -> Result<(), ApiError> {
        let wishlist = self.gateway.remove_wishlist_item(item_id).await?;
        self.mirror.install(wishlist);
        Ok(())
    }

    /// Empty the wishlist server-side.
    ///
    /// # Errors
    ///
    /// The snapshot is untouched on any error.
    #[instrument(skip_all)]
    pub async fn clear(&mut self) -> Result<(), ApiError> {
        let wishlist = self.gateway.clear_wishlist().await?;
        self.mirror.install(wishlist);
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
    use crate::models::{ProductRef, WishlistItem};
    use thread_saints_core::WishlistId;

    struct FakeWishlist {
        responses: Mutex<VecDeque<Result<Wishlist, ApiError>>>,
    }

    impl FakeWishlist {
        fn scripted(responses: Vec<Result<Wishlist, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }

        fn next(&self) -> Result<Wishlist, ApiError> {
            self.responses.lock().unwrap().pop_front().unwrap()
        }
    }

    impl WishlistGateway for FakeWishlist {
        async fn fetch_wishlist(&self) -> Result<Wishlist, ApiError> {
            self.next()
        }

        async fn add_to_wishlist(&self, _product_id: &ProductId) -> Result<Wishlist, ApiError> {
            self.next()
        }

        async fn remove_wishlist_item(
            &self,
            _item_id: &WishlistItemId,
        ) -> Result<Wishlist, ApiError> {
            self.next()
        }

        async fn clear_wishlist(&self) -> Result<Wishlist, ApiError> {
            self.next()
        }
    }

    fn wishlist_of(product_ids: &[&str]) -> Wishlist {
        Wishlist {
            id: WishlistId::new("w1"),
            items: product_ids
                .iter()
                .enumerate()
                .map(|(n, id)| WishlistItem {
                    id: WishlistItemId::new(format!("i{n}")),
                    product: ProductRef::Id(ProductId::new(*id)),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_sync_then_contains() {
        let mut session =
            WishlistSession::new(FakeWishlist::scripted(vec![Ok(wishlist_of(&["p1", "p2"]))]));
        assert!(!session.contains(&ProductId::new("p1")));

        session.sync().await.unwrap();

        assert_eq!(session.state(), SyncState::Ready);
        assert_eq!(session.item_count(), 2);
        assert!(session.contains(&ProductId::new("p1")));
        assert!(!session.contains(&ProductId::new("p9")));
    }

    #[tokio::test]
    async fn test_add_replaces_snapshot() {
        let mut session = WishlistSession::new(FakeWishlist::scripted(vec![
            Ok(wishlist_of(&["p1"])),
            Ok(wishlist_of(&["p1", "p2"])),
        ]));
        session.sync().await.unwrap();

        session.add(&ProductId::new("p2")).await.unwrap();
        assert!(session.contains(&ProductId::new("p2")));
        assert_eq!(session.item_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_snapshot_untouched() {
        let mut session = WishlistSession::new(FakeWishlist::scripted(vec![
            Ok(wishlist_of(&["p1"])),
            Err(ApiError::Rejected("Already in wishlist".to_owned())),
        ]));
        session.sync().await.unwrap();

        let err = session.add(&ProductId::new("p1")).await.unwrap_err();
        assert_eq!(err.to_string(), "Already in wishlist");
        assert_eq!(session.item_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_installs_server_response() {
        let mut session = WishlistSession::new(FakeWishlist::scripted(vec![
            Ok(wishlist_of(&["p1", "p2"])),
            Ok(wishlist_of(&["p2"])),
        ]));
        session.sync().await.unwrap();

        session.remove_item(&WishlistItemId::new("i0")).await.unwrap();
        assert!(!session.contains(&ProductId::new("p1")));
        assert!(session.contains(&ProductId::new("p2")));
    }

    #[tokio::test]
    async fn test_reset_discards_snapshot() {
        let mut session =
            WishlistSession::new(FakeWishlist::scripted(vec![Ok(wishlist_of(&["p1"]))]));
        session.sync().await.unwrap();

        session.reset();

        assert_eq!(session.state(), SyncState::Unauthenticated);
        assert!(!session.contains(&ProductId::new("p1")));
        assert_eq!(session.item_count(), 0);
    }
}
