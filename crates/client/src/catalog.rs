//! Catalog reads: products and categories, cached.
//!
//! The catalog is public and changes rarely, so responses are held in an
//! in-process cache with a short TTL. Admin mutations invalidate the
//! affected keys immediately rather than waiting out the TTL.

use thread_saints_core::{CategoryId, ProductId};
use tracing::instrument;

use crate::cache::CacheValue;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Category, Product};

const PRODUCTS_KEY: &str = "products";
const CATEGORIES_KEY: &str = "categories";

fn product_key(id: &ProductId) -> String {
    format!("product:{id}")
}

impl ApiClient {
    /// All active products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cache().get(PRODUCTS_KEY).await {
            return Ok(products);
        }

        let req = self.get(&self.endpoints().products());
        let products: Vec<Product> = self.send_expecting(req, "products").await?;

        self.cache()
            .insert(PRODUCTS_KEY.to_owned(), CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// `Rejected` with the server's message when the id is unknown.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_by_id(&self, id: &ProductId) -> Result<Product, ApiError> {
        let key = product_key(id);
        if let Some(CacheValue::Product(product)) = self.cache().get(&key).await {
            return Ok(*product);
        }

        let req = self.get(&self.endpoints().product(id));
        let product: Product = self.send_expecting(req, "product").await?;

        self.cache()
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) = self.cache().get(CATEGORIES_KEY).await {
            return Ok(categories);
        }

        let req = self.get(&self.endpoints().categories());
        let categories: Vec<Category> = self.send_expecting(req, "categories").await?;

        self.cache()
            .insert(
                CATEGORIES_KEY.to_owned(),
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }

    /// A single category by id. Not cached; the list endpoint covers the
    /// hot path.
    ///
    /// # Errors
    ///
    /// `Rejected` with the server's message when the id is unknown.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category_by_id(&self, id: &CategoryId) -> Result<Category, ApiError> {
        let req = self.get(&self.endpoints().category(id));
        self.send_expecting(req, "category").await
    }

    /// Drop cached product entries after an admin product mutation.
    pub(crate) async fn invalidate_products(&self, id: Option<&ProductId>) {
        self.cache().invalidate(PRODUCTS_KEY).await;
        if let Some(id) = id {
            self.cache().invalidate(&product_key(id)).await;
        }
    }

    /// Drop the cached category list after an admin category mutation.
    pub(crate) async fn invalidate_categories(&self) {
        self.cache().invalidate(CATEGORIES_KEY).await;
    }
}
