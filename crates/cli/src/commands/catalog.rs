//! Catalog browsing commands.

use clap::Subcommand;
use thread_saints_client::{ApiError, Storefront};
use thread_saints_core::ProductId;

#[derive(Subcommand)]
pub enum ProductAction {
    /// List all active products
    List,
    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },
}

pub async fn products(store: &Storefront, action: ProductAction) -> Result<(), ApiError> {
    match action {
        ProductAction::List => {
            let products = store.products().await?;
            for product in &products {
                let price = product.effective_price();
                println!(
                    "{}  {:<40} {:>10}  stock {}",
                    product.id, product.name, price.to_string(), product.stock
                );
            }
            println!("{} product(s)", products.len());
        }
        ProductAction::Show { id } => {
            let product = store.product(&ProductId::new(id)).await?;
            println!("{}", product.name);
            println!("  id:       {}", product.id);
            println!("  category: {}", product.category);
            println!("  price:    {}", product.price);
            if let Some(sale) = product.sale_price {
                println!("  on sale:  {sale}");
            }
            println!("  sizes:    {}", product.sizes.join(", "));
            println!("  colors:   {}", product.colors.join(", "));
            println!("  stock:    {}", product.stock);
            println!("  rating:   {} ({} reviews)", product.rating, product.review_count);
            println!();
            println!("{}", product.description);
        }
    }
    Ok(())
}

pub async fn categories(store: &Storefront) -> Result<(), ApiError> {
    let categories = store.categories().await?;
    for category in &categories {
        match &category.description {
            Some(description) => println!("{}  {} - {}", category.id, category.name, description),
            None => println!("{}  {}", category.id, category.name),
        }
    }
    Ok(())
}
