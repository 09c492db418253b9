//! Catalog administration commands.
//!
//! These all require an admin account; the backend answers 403 otherwise and
//! the error is surfaced as-is.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use thread_saints_client::admin::{CategoryForm, ImageUpload, ProductForm};
use thread_saints_client::Storefront;
use thread_saints_core::{CategoryId, Price, ProductId};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductCrud,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCrud,
    },
    /// Upload up to five images; prints their hosted URLs
    Upload {
        /// Image files (jpg, png, webp, gif)
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProductCrud {
    /// Create a product
    Create(ProductArgs),
    /// Replace a product's editable fields
    Update {
        /// Product id
        id: String,

        #[command(flatten)]
        args: ProductArgs,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(Args)]
pub struct ProductArgs {
    /// Product name
    #[arg(long)]
    pub name: String,

    /// Product description
    #[arg(long)]
    pub description: String,

    /// Price in whole rupees
    #[arg(long)]
    pub price: i64,

    /// Sale price in whole rupees
    #[arg(long)]
    pub sale_price: Option<i64>,

    /// Hosted image URLs (from `admin upload`), in display order
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Category name
    #[arg(long)]
    pub category: String,

    /// Available sizes
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Available colors
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    pub stock: u32,

    /// Hide the product from the storefront
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Subcommand)]
pub enum CategoryCrud {
    /// Create a category
    Create {
        /// Category name
        #[arg(long)]
        name: String,

        /// Category description
        #[arg(long)]
        description: Option<String>,

        /// Hosted banner image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Replace a category's editable fields
    Update {
        /// Category id
        id: String,

        /// Category name
        #[arg(long)]
        name: String,

        /// Category description
        #[arg(long)]
        description: Option<String>,

        /// Hosted banner image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category id
        id: String,
    },
}

impl From<ProductArgs> for ProductForm {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: Price::from_rupees(args.price),
            sale_price: args.sale_price.map(Price::from_rupees),
            images: args.images,
            category: args.category,
            sizes: args.sizes,
            colors: args.colors,
            stock: args.stock,
            product_details: None,
            washing_instructions: None,
            returns_policy: None,
            shipping_info: None,
            is_active: !args.inactive,
        }
    }
}

pub async fn run(
    store: &mut Storefront,
    action: AdminAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = store.client().clone();
    match action {
        AdminAction::Product { action } => match action {
            ProductCrud::Create(args) => {
                let product = client.create_product(&args.into()).await?;
                println!("Created product {} ({})", product.name, product.id);
            }
            ProductCrud::Update { id, args } => {
                let product = client
                    .update_product(&ProductId::new(id), &args.into())
                    .await?;
                println!("Updated product {} ({})", product.name, product.id);
            }
            ProductCrud::Delete { id } => {
                let message = client.delete_product(&ProductId::new(id)).await?;
                println!("{}", message.unwrap_or_else(|| "Product deleted".to_owned()));
            }
        },
        AdminAction::Category { action } => match action {
            CategoryCrud::Create {
                name,
                description,
                image,
            } => {
                let category = client
                    .create_category(&CategoryForm {
                        name,
                        description,
                        image,
                    })
                    .await?;
                println!("Created category {} ({})", category.name, category.id);
            }
            CategoryCrud::Update {
                id,
                name,
                description,
                image,
            } => {
                let category = client
                    .update_category(
                        &CategoryId::new(id),
                        &CategoryForm {
                            name,
                            description,
                            image,
                        },
                    )
                    .await?;
                println!("Updated category {} ({})", category.name, category.id);
            }
            CategoryCrud::Delete { id } => {
                let message = client.delete_category(&CategoryId::new(id)).await?;
                println!("{}", message.unwrap_or_else(|| "Category deleted".to_owned()));
            }
        },
        AdminAction::Upload { files } => {
            let mut images = Vec::with_capacity(files.len());
            for path in &files {
                images.push(read_image(path)?);
            }
            let urls = if images.len() == 1 {
                let image = images.remove(0);
                vec![client.upload_image(image).await?]
            } else {
                client.upload_images(images).await?
            };
            for url in urls {
                println!("{url}");
            }
        }
    }
    Ok(())
}

fn read_image(path: &Path) -> Result<ImageUpload, std::io::Error> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_owned(), |name| name.to_string_lossy().into_owned());
    Ok(ImageUpload {
        bytes,
        mime_type: mime_for(&file_name).to_owned(),
        file_name,
    })
}

fn mime_for(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
