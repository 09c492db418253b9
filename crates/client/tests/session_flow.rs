//! End-to-end session lifecycle over in-memory gateways: restore, login,
//! mirror syncs, mutations, expiry, logout.

use std::collections::VecDeque;
use std::sync::Mutex;

use secrecy::SecretString;
use thread_saints_client::auth::{
    Credential, CredentialHolder, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
use thread_saints_client::gateway::{AuthGateway, CartGateway, WishlistGateway};
use thread_saints_client::http::TokenSlot;
use thread_saints_client::models::{
    Cart, CartItem, Identity, ProductRef, Wishlist, WishlistItem,
};
use thread_saints_client::{ApiError, CartSession, SyncState, WishlistSession};
use thread_saints_core::{
    CartId, CartItemId, Email, Price, ProductId, UserId, WishlistId, WishlistItemId,
};

struct FakeAuth;

impl AuthGateway for FakeAuth {
    async fn login(&self, email: &str, _password: &str) -> Result<Credential, ApiError> {
        Ok(Credential::new(
            SecretString::from("t1"),
            Identity {
                id: UserId::new("u1"),
                email: Email::parse(email).map_err(|e| ApiError::Validation(e.to_string()))?,
            },
        ))
    }

    async fn signup(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        self.login(email, password).await
    }
}

struct Scripted<T> {
    responses: Mutex<VecDeque<Result<T, ApiError>>>,
}

impl<T> Scripted<T> {
    fn new(responses: Vec<Result<T, ApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }

    fn next(&self) -> Result<T, ApiError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("gateway called more times than scripted"))
    }
}

impl CartGateway for Scripted<Cart> {
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

impl WishlistGateway for Scripted<Wishlist> {
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

fn cart_of(quantity: u32) -> Cart {
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
async fn full_session_lifecycle() {
    let token_slot = TokenSlot::new();
    let mut credentials =
        CredentialHolder::new(MemoryCredentialStore::default(), token_slot.clone());
    let mut cart = CartSession::new(Scripted::new(vec![Ok(cart_of(2)), Ok(cart_of(3))]));
    let mut wishlist = WishlistSession::new(Scripted::new(vec![
        Ok(wishlist_of(&["p1"])),
        Ok(wishlist_of(&["p1", "p2"])),
    ]));

    // Anonymous: no token, no snapshots, derived values at their zero points.
    assert!(!credentials.is_authenticated());
    assert!(!token_slot.is_present());
    assert_eq!(cart.state(), SyncState::Unauthenticated);
    assert_eq!(cart.item_count(), 0);
    assert!(!wishlist.contains(&ProductId::new("p1")));

    // Login installs the token before any dependent fetch goes out.
    credentials.login(&FakeAuth, "user@example.com", "pw").await.unwrap();
    assert!(token_slot.is_present());
    assert_eq!(credentials.identity().unwrap().id, UserId::new("u1"));

    // Both mirrors fetch and go Ready.
    cart.sync().await.unwrap();
    wishlist.sync().await.unwrap();
    assert_eq!(cart.state(), SyncState::Ready);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.subtotal(), Price::from_rupees(1998));
    assert!(wishlist.contains(&ProductId::new("p1")));

    // Mutations install the server's replacement snapshots.
    cart.add(&ProductId::new("p1"), 1, Some("M")).await.unwrap();
    assert_eq!(cart.item_count(), 3);
    wishlist.add(&ProductId::new("p2")).await.unwrap();
    assert_eq!(wishlist.item_count(), 2);

    // Logout clears everything locally, with no server round-trip.
    credentials.logout();
    cart.reset();
    wishlist.reset();
    assert!(!credentials.is_authenticated());
    assert!(!token_slot.is_present());
    assert_eq!(cart.state(), SyncState::Unauthenticated);
    assert!(cart.snapshot().is_none());
    assert_eq!(wishlist.item_count(), 0);
}

#[tokio::test]
async fn failed_fetch_surfaces_error_but_keeps_prior_snapshot() {
    let mut cart = CartSession::new(Scripted::new(vec![
        Ok(cart_of(1)),
        Err(ApiError::Rejected("Server error".to_owned())),
    ]));

    cart.sync().await.unwrap();
    let err = cart.sync().await.unwrap_err();

    assert_eq!(err.user_message(), "Server error");
    assert_eq!(cart.state(), SyncState::Ready);
    assert_eq!(cart.item_count(), 1);
}

#[tokio::test]
async fn credential_survives_process_restart() {
    let mut path = std::env::temp_dir();
    path.push(format!("ts-session-flow-{}.json", std::process::id()));

    {
        let mut credentials = CredentialHolder::new(
            FileCredentialStore::new(path.clone()),
            TokenSlot::new(),
        );
        credentials.login(&FakeAuth, "user@example.com", "pw").await.unwrap();
    }

    // A fresh holder over the same file picks the session back up.
    let slot = TokenSlot::new();
    let mut credentials = CredentialHolder::new(FileCredentialStore::new(path.clone()), slot.clone());
    assert!(credentials.restore());
    assert!(slot.is_present());
    assert_eq!(credentials.identity().unwrap().id, UserId::new("u1"));

    credentials.logout();
    assert!(FileCredentialStore::new(path).load().is_none());
}

#[tokio::test]
async fn unauthorized_fetch_reports_session_expiry() {
    let mut cart = CartSession::new(Scripted::new(vec![Err(ApiError::Unauthorized(
        "Token expired".to_owned(),
    ))]));

    let err = cart.sync().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(cart.state(), SyncState::Unauthenticated);
}
