//! Admin surface: catalog CRUD and image upload.
//!
//! Authorization is entirely server-side; these calls simply go out with the
//! current bearer token and get a 403 back when the account is not an admin.
//! Every successful mutation invalidates the affected catalog cache entries
//! so public reads pick the change up immediately.

use serde::Serialize;
use thread_saints_core::{CategoryId, Price, ProductId};
use tracing::instrument;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Category, Product};

/// Images per upload batch, matching the backend's limit.
const MAX_UPLOAD_BATCH: usize = 5;

/// Product form submitted by create and update. The server fills in ids,
/// ratings, and review counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Price>,
    pub images: Vec<String>,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub washing_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<String>,
    pub is_active: bool,
}

/// Category form submitted by create and update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One image file staged for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl ImageUpload {
    fn into_part(self) -> Result<reqwest::multipart::Part, ApiError> {
        Ok(reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?)
    }
}

impl ApiClient {
    /// Create a product.
    ///
    /// # Errors
    ///
    /// `Rejected` when the account lacks admin rights.
    #[instrument(skip_all, fields(name = %form.name))]
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, ApiError> {
        let req = self.post(&self.endpoints().products()).json(form);
        let product: Product = self.send_expecting(req, "product").await?;
        self.invalidate_products(None).await;
        Ok(product)
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// `Rejected` when the account lacks admin rights or when
    /// the id is unknown.
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: &ProductForm,
    ) -> Result<Product, ApiError> {
        let req = self.put(&self.endpoints().product(id)).json(form);
        let product: Product = self.send_expecting(req, "product").await?;
        self.invalidate_products(Some(id)).await;
        Ok(product)
    }

    /// Delete a product. Returns the server's confirmation message, if any.
    ///
    /// # Errors
    ///
    /// `Rejected` when the account lacks admin rights or when
    /// the id is unknown.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<Option<String>, ApiError> {
        let req = self.delete(&self.endpoints().product(id));
        let message = self.send_for_ack(req).await?;
        self.invalidate_products(Some(id)).await;
        Ok(message)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// `Rejected` when the account lacks admin rights.
    #[instrument(skip_all, fields(name = %form.name))]
    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, ApiError> {
        let req = self.post(&self.endpoints().categories()).json(form);
        let category: Category = self.send_expecting(req, "category").await?;
        self.invalidate_categories().await;
        Ok(category)
    }

    /// Replace a category's editable fields.
    ///
    /// # Errors
    ///
    /// `Rejected` when the account lacks admin rights or when
    /// the id is unknown.
    #[instrument(skip_all, fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        form: &CategoryForm,
    ) -> Result<Category, ApiError> {
        let req = self.put(&self.endpoints().category(id)).json(form);
        let category: Category = self.send_expecting(req, "category").await?;
        self.invalidate_categories().await;
        Ok(category)
    }

    /// Delete a category. Returns the server's confirmation message, if any.
    ///
    /// # Errors
    ///
    /// `Rejected` when the account lacks admin rights or when
    /// the id is unknown or still has products.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<Option<String>, ApiError> {
        let req = self.delete(&self.endpoints().category(id));
        let message = self.send_for_ack(req).await?;
        self.invalidate_categories().await;
        Ok(message)
    }

    /// Upload a single image; returns its hosted URL.
    ///
    /// # Errors
    ///
    /// `Rejected` when the account lacks admin rights.
    #[instrument(skip_all, fields(file_name = %image.file_name))]
    pub async fn upload_image(&self, image: ImageUpload) -> Result<String, ApiError> {
        let form = reqwest::multipart::Form::new().part("image", image.into_part()?);
        let req = self.post(&self.endpoints().upload_single()).multipart(form);
        self.send_expecting(req, "imageUrl").await
    }

    /// Upload up to five images in one batch; returns the hosted URLs in
    /// submission order.
    ///
    /// # Errors
    ///
    /// `Validation` when the batch is empty or over the limit;
    /// `Rejected` when the account lacks admin rights.
    #[instrument(skip_all, fields(count = images.len()))]
    pub async fn upload_images(&self, images: Vec<ImageUpload>) -> Result<Vec<String>, ApiError> {
        if images.is_empty() {
            return Err(ApiError::Validation("no images to upload".to_owned()));
        }
        if images.len() > MAX_UPLOAD_BATCH {
            return Err(ApiError::Validation(format!(
                "at most {MAX_UPLOAD_BATCH} images per upload"
            )));
        }

        let mut form = reqwest::multipart::Form::new();
        for image in images {
            form = form.part("images", image.into_part()?);
        }
        let req = self.post(&self.endpoints().upload_multiple()).multipart(form);
        self.send_expecting(req, "imageUrls").await
    }
}
