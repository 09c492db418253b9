//! Orders and checkout.
//!
//! Checkout is a three-step conversation: create the order (backend also
//! opens a payment-gateway order), hand the gateway order to the payment
//! widget out-of-band, then relay the capture identifiers back for signature
//! verification. The client computes totals only to display and submit them;
//! the backend recomputes and is authoritative.

use serde::Serialize;
use thread_saints_core::OrderId;
use tracing::instrument;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{
    Cart, Order, OrderTotals, PaymentConfirmation, RazorpayOrder, ShippingAddress,
};

/// What order creation returns: our order plus the gateway order the payment
/// widget needs.
#[derive(Debug, Clone)]
pub struct CheckoutResponse {
    pub order: Order,
    pub razorpay_order: RazorpayOrder,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest<'a> {
    order_items: Vec<OrderLine<'a>>,
    shipping_address: &'a ShippingAddress,
    #[serde(flatten)]
    totals: OrderTotals,
}

#[derive(Serialize)]
struct OrderLine<'a> {
    product: &'a thread_saints_core::ProductId,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    price: thread_saints_core::Price,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
}

impl ApiClient {
    /// The payment gateway's public key id, needed to open the widget.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn payment_key(&self) -> Result<String, ApiError> {
        let req = self.get(&self.endpoints().payment_key());
        self.send_expecting(req, "key").await
    }

    /// Create an order from the current cart snapshot and a shipping
    /// address.
    ///
    /// # Errors
    ///
    /// `Validation` if the cart is empty or the address has a blank field;
    /// otherwise whatever the call produced.
    #[instrument(skip_all)]
    pub async fn create_order(
        &self,
        cart: &Cart,
        address: &ShippingAddress,
    ) -> Result<CheckoutResponse, ApiError> {
        if cart.items.is_empty() {
            return Err(ApiError::Validation("cart is empty".to_owned()));
        }
        if let Err(field) = address.validate() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }

        let payload = CreateOrderRequest {
            order_items: cart
                .items
                .iter()
                .map(|item| OrderLine {
                    product: item.product.id(),
                    name: &item.name,
                    image: item.image.as_deref(),
                    price: item.price,
                    quantity: item.quantity,
                    size: item.size.as_deref(),
                })
                .collect(),
            shipping_address: address,
            totals: OrderTotals::from_subtotal(cart.subtotal()),
        };

        let req = self.post(&self.endpoints().orders()).json(&payload);
        let mut envelope = self.send(req).await?;

        Ok(CheckoutResponse {
            order: envelope.take("order")?,
            razorpay_order: envelope.take("razorpayOrder")?,
        })
    }

    /// Relay the gateway's capture identifiers for signature verification.
    /// Returns the server's confirmation message, if it sent one.
    ///
    /// # Errors
    ///
    /// `Rejected` when verification fails; the order stays unpaid.
    #[instrument(skip_all, fields(order_id = %confirmation.order_id))]
    pub async fn verify_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> Result<Option<String>, ApiError> {
        let req = self.post(&self.endpoints().payment_verify()).json(confirmation);
        self.send_for_ack(req).await
    }

    /// The logged-in user's orders, newest first per the backend.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a credential.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let req = self.get(&self.endpoints().orders());
        self.send_expecting(req, "orders").await
    }

    /// A single order by id.
    ///
    /// # Errors
    ///
    /// `Rejected` with the server's message when the id is unknown or not
    /// the caller's.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order_by_id(&self, id: &OrderId) -> Result<Order, ApiError> {
        let req = self.get(&self.endpoints().order(id));
        self.send_expecting(req, "order").await
    }
}
