//! Cache types for catalog responses.

use crate::models::{Category, Product};

/// Cached value types. Only read-only catalog data is cached; cart, wishlist
/// and order snapshots are always fetched fresh.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
}
