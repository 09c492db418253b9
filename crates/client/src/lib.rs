//! Thread Saints client SDK.
//!
//! Typed client for the Thread Saints store's REST backend. The backend owns
//! all business logic (inventory, pricing, payment verification,
//! persistence); this crate mirrors server state on the client side and
//! forwards every mutation to a remote endpoint.
//!
//! # Architecture
//!
//! The repeated pattern here is the **session mirror**: a container holding a
//! nullable snapshot of a server-owned collection that
//!
//! - re-fetches the snapshot whenever a credential becomes available,
//! - replaces the snapshot wholesale with the server's response after every
//!   successful mutation (never patches locally), and
//! - exposes pure derived accessors (counts, totals) over the snapshot.
//!
//! [`CartSession`] and [`WishlistSession`] are the two instantiations;
//! [`auth::CredentialHolder`] owns the bearer token they depend on, and
//! [`Storefront`] is the composition root that wires credential changes to
//! re-fetches.
//!
//! # Example
//!
//! ```rust,ignore
//! use thread_saints_client::{ClientConfig, Storefront};
//!
//! let mut store = Storefront::new(&ClientConfig::from_env()?)?;
//! store.restore().await;
//!
//! store.login("user@example.com", "secret").await?;
//! store.add_to_cart(&product_id, 1, Some("M")).await?;
//! println!("{} items", store.cart().item_count());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod auth;
mod cache;
pub mod catalog;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod http;
pub mod models;
pub mod orders;
pub mod session;
pub mod store;

mod cart;
mod wishlist;

pub use cart::CartSession;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::ApiClient;
pub use session::SyncState;
pub use store::Storefront;
pub use wishlist::WishlistSession;
