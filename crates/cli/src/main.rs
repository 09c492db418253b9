//! Thread Saints CLI - shop the store and manage the catalog from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (credential persists across invocations)
//! ts-cli login -e user@example.com -p secret
//!
//! # Browse the catalog
//! ts-cli products list
//! ts-cli products show 665f1c2ab9d1a826dc0fe111
//!
//! # Shop
//! ts-cli cart add 665f1c2ab9d1a826dc0fe111 --quantity 2 --size M
//! ts-cli cart show
//! ts-cli checkout --name "Arjun Mehta" --phone 9876543210 \
//!     --address "14 Linking Road" --city Mumbai --state Maharashtra \
//!     --pincode 400050
//!
//! # Catalog admin (requires an admin account)
//! ts-cli admin product delete 665f1c2ab9d1a826dc0fe111
//! ts-cli admin upload front.jpg back.jpg
//! ```
//!
//! # Commands
//!
//! - `login` / `signup` / `logout` / `whoami` - Session management
//! - `products` / `categories` - Browse the catalog
//! - `cart` / `wishlist` - Manage the session mirrors
//! - `orders` / `checkout` / `confirm-payment` - Order flow
//! - `admin` - Catalog CRUD and image upload

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use thread_saints_client::{ClientConfig, Storefront};

mod commands;

#[derive(Parser)]
#[command(name = "ts-cli")]
#[command(author, version, about = "Thread Saints store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the credential
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account (logs straight in)
    Signup {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// End the session and remove the persisted credential
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// Browse products
    Products {
        #[command(subcommand)]
        action: commands::catalog::ProductAction,
    },
    /// List categories
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: commands::wishlist::WishlistAction,
    },
    /// View past orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
    /// Create an order from the current cart
    Checkout(commands::orders::CheckoutArgs),
    /// Relay payment capture identifiers for verification
    ConfirmPayment(commands::orders::ConfirmArgs),
    /// Catalog administration
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let mut store = Storefront::new(&config)?;
    store.restore().await;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut store, &email, &password).await?;
        }
        Commands::Signup { email, password } => {
            commands::auth::signup(&mut store, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&mut store),
        Commands::Whoami => commands::auth::whoami(&store),
        Commands::Products { action } => commands::catalog::products(&store, action).await?,
        Commands::Categories => commands::catalog::categories(&store).await?,
        Commands::Cart { action } => commands::cart::run(&mut store, action).await?,
        Commands::Wishlist { action } => commands::wishlist::run(&mut store, action).await?,
        Commands::Orders { action } => commands::orders::run(&mut store, action).await?,
        Commands::Checkout(args) => commands::orders::checkout(&mut store, args).await?,
        Commands::ConfirmPayment(args) => commands::orders::confirm(&mut store, args).await?,
        Commands::Admin { action } => commands::admin::run(&mut store, action).await?,
    }
    Ok(())
}
