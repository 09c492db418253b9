//! Session commands: login, signup, logout, whoami.

use thread_saints_client::{ApiError, Storefront};

pub async fn login(store: &mut Storefront, email: &str, password: &str) -> Result<(), ApiError> {
    store.login(email, password).await?;
    println!("Logged in as {email}");
    println!(
        "Cart: {} item(s), wishlist: {} item(s)",
        store.cart().item_count(),
        store.wishlist().item_count()
    );
    Ok(())
}

pub async fn signup(store: &mut Storefront, email: &str, password: &str) -> Result<(), ApiError> {
    store.signup(email, password).await?;
    println!("Account created, logged in as {email}");
    Ok(())
}

pub fn logout(store: &mut Storefront) {
    store.logout();
    println!("Logged out");
}

pub fn whoami(store: &Storefront) {
    match store.identity() {
        Some(identity) => println!("{} ({})", identity.email, identity.id),
        None => println!("Not logged in"),
    }
}
