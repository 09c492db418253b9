//! Command implementations, one module per surface.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wishlist;
