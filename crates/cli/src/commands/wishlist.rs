//! Wishlist commands.

use clap::Subcommand;
use thread_saints_client::{ApiError, Storefront};
use thread_saints_core::{ProductId, WishlistItemId};

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show the current wishlist
    Show,
    /// Save a product
    Add {
        /// Product id
        product_id: String,
    },
    /// Remove a saved item
    Remove {
        /// Wishlist item id (from `wishlist show`)
        item_id: String,
    },
    /// Empty the wishlist
    Clear,
    /// Check whether a product is saved
    Contains {
        /// Product id
        product_id: String,
    },
}

pub async fn run(store: &mut Storefront, action: WishlistAction) -> Result<(), ApiError> {
    match action {
        WishlistAction::Show => {}
        WishlistAction::Add { product_id } => {
            store.add_to_wishlist(&ProductId::new(product_id)).await?;
        }
        WishlistAction::Remove { item_id } => {
            store
                .remove_wishlist_item(&WishlistItemId::new(item_id))
                .await?;
        }
        WishlistAction::Clear => store.clear_wishlist().await?,
        WishlistAction::Contains { product_id } => {
            let saved = store.wishlist().contains(&ProductId::new(product_id));
            println!("{}", if saved { "saved" } else { "not saved" });
            return Ok(());
        }
    }
    print_wishlist(store);
    Ok(())
}

fn print_wishlist(store: &Storefront) {
    let Some(wishlist) = store.wishlist().snapshot() else {
        println!("No wishlist loaded (log in first)");
        return;
    };
    if wishlist.items.is_empty() {
        println!("Wishlist is empty");
        return;
    }
    for item in &wishlist.items {
        match item.product.product() {
            Some(product) => println!(
                "{}  {:<40} {}",
                item.id,
                product.name,
                product.effective_price()
            ),
            None => println!("{}  product {}", item.id, item.product.id()),
        }
    }
    println!("{} item(s)", store.wishlist().item_count());
}
