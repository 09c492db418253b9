//! Thread Saints Core - Shared types library.
//!
//! This crate provides common types used across all Thread Saints components:
//! - `client` - SDK for the store's REST backend (session mirrors, catalog)
//! - `cli` - Command-line storefront and admin tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The backend
//! owns every entity described here; this crate merely gives the wire shapes
//! type-safe Rust spellings.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
