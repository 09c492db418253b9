//! Cart commands. Every mutation prints the cart as the server returned it.

use clap::Subcommand;
use thread_saints_client::{ApiError, Storefront};
use thread_saints_core::{CartItemId, ProductId};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product
    Add {
        /// Product id
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Size variant (S, M, L, ...)
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Set a cart line's quantity
    Update {
        /// Cart item id (from `cart show`)
        item_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Cart item id (from `cart show`)
        item_id: String,
    },
    /// Empty the cart
    Clear,
}

pub async fn run(store: &mut Storefront, action: CartAction) -> Result<(), ApiError> {
    match action {
        CartAction::Show => {}
        CartAction::Add {
            product_id,
            quantity,
            size,
        } => {
            store
                .add_to_cart(&ProductId::new(product_id), quantity, size.as_deref())
                .await?;
        }
        CartAction::Update { item_id, quantity } => {
            store
                .update_cart_item(&CartItemId::new(item_id), quantity)
                .await?;
        }
        CartAction::Remove { item_id } => {
            store.remove_cart_item(&CartItemId::new(item_id)).await?;
        }
        CartAction::Clear => store.clear_cart().await?,
    }
    print_cart(store);
    Ok(())
}

fn print_cart(store: &Storefront) {
    let Some(cart) = store.cart().snapshot() else {
        println!("No cart loaded (log in first)");
        return;
    };
    if cart.items.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in &cart.items {
        let size = item.size.as_deref().unwrap_or("-");
        println!(
            "{}  {:<40} size {:<4} x{:<3} {}",
            item.id, item.name, size, item.quantity, item.price
        );
    }
    println!(
        "{} item(s), subtotal {}",
        store.cart().item_count(),
        store.cart().subtotal()
    );
}
