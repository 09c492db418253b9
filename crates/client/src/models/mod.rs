//! Wire models for the store API.
//!
//! Every type here is owned by the backend: the client deserializes them,
//! renders them, and passes ids back to mutating calls. Snapshots (cart,
//! wishlist) are only ever replaced wholesale with the server's latest
//! response, never mutated field-by-field, so local state cannot diverge
//! from server state beyond the staleness window of an in-flight request.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;
pub mod wishlist;

pub use cart::{Cart, CartItem};
pub use catalog::{Category, Product, ProductRef};
pub use order::{Order, OrderItem, OrderTotals, PaymentConfirmation, RazorpayOrder, ShippingAddress};
pub use user::Identity;
pub use wishlist::{Wishlist, WishlistItem};
