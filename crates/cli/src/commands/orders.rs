//! Order commands: history, checkout, payment confirmation.
//!
//! The payment capture itself happens in the gateway's own surface; the CLI
//! creates the order, prints the gateway order id the widget needs, and
//! later relays the capture identifiers with `confirm-payment`.

use clap::{Args, Subcommand};
use thread_saints_client::models::{Order, PaymentConfirmation, ShippingAddress};
use thread_saints_client::{ApiError, Storefront};
use thread_saints_core::OrderId;

#[derive(Subcommand)]
pub enum OrderAction {
    /// List your orders
    List,
    /// Show one order in full
    Show {
        /// Order id
        id: String,
    },
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient full name
    #[arg(long = "name")]
    pub full_name: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// State
    #[arg(long)]
    pub state: String,

    /// Postal code
    #[arg(long)]
    pub pincode: String,
}

#[derive(Args)]
pub struct ConfirmArgs {
    /// Our order id (printed by `checkout`)
    #[arg(long)]
    pub order_id: String,

    /// Gateway order id
    #[arg(long)]
    pub razorpay_order_id: String,

    /// Gateway payment id
    #[arg(long)]
    pub razorpay_payment_id: String,

    /// Gateway signature
    #[arg(long)]
    pub razorpay_signature: String,
}

pub async fn run(store: &mut Storefront, action: OrderAction) -> Result<(), ApiError> {
    match action {
        OrderAction::List => {
            let orders = store.my_orders().await?;
            for order in &orders {
                let placed = order.created_at.as_deref().unwrap_or("-");
                println!(
                    "{}  {:<16} {:>10}  {}",
                    order.id,
                    order.status.to_string(),
                    order.total_price.to_string(),
                    placed
                );
            }
            println!("{} order(s)", orders.len());
        }
        OrderAction::Show { id } => {
            let order = store.order(&OrderId::new(id)).await?;
            print_order(&order);
        }
    }
    Ok(())
}

pub async fn checkout(store: &mut Storefront, args: CheckoutArgs) -> Result<(), ApiError> {
    let address = ShippingAddress {
        full_name: args.full_name,
        phone: args.phone,
        address: args.address,
        city: args.city,
        state: args.state,
        pincode: args.pincode,
    };

    let key = store.client().payment_key().await?;
    let checkout = store.checkout(&address).await?;

    print_order(&checkout.order);
    println!();
    println!("Payment gateway key:      {key}");
    println!("Payment gateway order id: {}", checkout.razorpay_order.id);
    println!(
        "Amount due:               {} {} (smallest unit)",
        checkout.razorpay_order.amount, checkout.razorpay_order.currency
    );
    println!("Complete the payment, then run `ts-cli confirm-payment`.");
    Ok(())
}

pub async fn confirm(store: &mut Storefront, args: ConfirmArgs) -> Result<(), ApiError> {
    let confirmation = PaymentConfirmation {
        razorpay_order_id: args.razorpay_order_id,
        razorpay_payment_id: args.razorpay_payment_id,
        razorpay_signature: args.razorpay_signature,
        order_id: OrderId::new(args.order_id),
    };
    let message = store.confirm_payment(&confirmation).await?;
    println!("{}", message.unwrap_or_else(|| "Payment verified".to_owned()));
    Ok(())
}

fn print_order(order: &Order) {
    println!("Order {}", order.id);
    let progress = if order.status.is_terminal() { "" } else { " (in progress)" };
    println!("  status:   {}{progress}", order.status);
    println!("  paid:     {}", if order.is_paid { "yes" } else { "no" });
    for item in &order.order_items {
        let size = item.size.as_deref().unwrap_or("-");
        println!(
            "  {:<40} size {:<4} x{:<3} {}",
            item.name, size, item.quantity, item.price
        );
    }
    println!("  items:    {}", order.items_price);
    println!("  shipping: {}", order.shipping_price);
    println!("  tax:      {}", order.tax_price);
    println!("  total:    {}", order.total_price);
    println!(
        "  ship to:  {}, {}, {} {} ({})",
        order.shipping_address.address,
        order.shipping_address.city,
        order.shipping_address.state,
        order.shipping_address.pincode,
        order.shipping_address.full_name
    );
}
