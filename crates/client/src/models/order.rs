//! Order, checkout, and payment models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thread_saints_core::{CurrencyCode, OrderId, OrderStatus, Price};

use super::catalog::ProductRef;

/// Subtotal above which shipping is free.
const FREE_SHIPPING_THRESHOLD: i64 = 1000;
/// Flat shipping charge below the threshold.
const FLAT_SHIPPING: i64 = 50;
/// GST rate applied to the items subtotal.
const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2); // 0.18

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub items_price: Price,
    pub shipping_price: Price,
    pub tax_price: Price,
    pub total_price: Price,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub is_paid: bool,
    /// ISO-8601 timestamps, carried opaquely; the client never does date math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
}

/// A line on an order, denormalized by the backend at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductRef,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Shipping address collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl ShippingAddress {
    /// Check that every field is filled before an order call is issued.
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing field.
    pub fn validate(&self) -> Result<(), &'static str> {
        let fields = [
            (&self.full_name, "fullName"),
            (&self.phone, "phone"),
            (&self.address, "address"),
            (&self.city, "city"),
            (&self.state, "state"),
            (&self.pincode, "pincode"),
        ];
        for (value, name) in fields {
            if value.trim().is_empty() {
                return Err(name);
            }
        }
        Ok(())
    }
}

/// Checkout totals computed from the cart subtotal.
///
/// Free shipping above Rs.1000, otherwise a flat Rs.50; 18% GST rounded to
/// the nearest rupee. The backend recomputes and is authoritative; this
/// exists so the client can show the same numbers it is about to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub items_price: Price,
    pub shipping_price: Price,
    pub tax_price: Price,
    pub total_price: Price,
}

impl OrderTotals {
    /// Compute totals from an items subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Price) -> Self {
        let shipping = if subtotal.amount() > Decimal::from(FREE_SHIPPING_THRESHOLD) {
            Price::zero()
        } else {
            Price::from_rupees(FLAT_SHIPPING)
        };
        let tax = Price::new(subtotal.amount() * GST_RATE).round_to_rupee();

        Self {
            items_price: subtotal,
            shipping_price: shipping,
            tax_price: tax,
            total_price: subtotal + shipping + tax,
        }
    }
}

/// The payment-gateway order the backend creates alongside ours.
///
/// Amount is in the gateway's smallest unit (paise); the client only relays
/// these values back during verification and never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: CurrencyCode,
}

/// Payment identifiers handed back by the gateway after a capture, relayed
/// to the backend for signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub order_id: OrderId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_below_threshold() {
        let totals = OrderTotals::from_subtotal(Price::from_rupees(800));
        assert_eq!(totals.shipping_price, Price::from_rupees(50));
        assert_eq!(totals.tax_price, Price::from_rupees(144));
        assert_eq!(totals.total_price, Price::from_rupees(994));
    }

    #[test]
    fn test_totals_at_threshold_still_charges_shipping() {
        // Strictly greater than Rs.1000 qualifies for free shipping.
        let totals = OrderTotals::from_subtotal(Price::from_rupees(1000));
        assert_eq!(totals.shipping_price, Price::from_rupees(50));
    }

    #[test]
    fn test_totals_above_threshold() {
        let totals = OrderTotals::from_subtotal(Price::from_rupees(1001));
        assert_eq!(totals.shipping_price, Price::zero());
        assert_eq!(totals.tax_price, Price::from_rupees(180));
        assert_eq!(totals.total_price, Price::from_rupees(1181));
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 18% of 997 = 179.46 -> 179
        let totals = OrderTotals::from_subtotal(Price::from_rupees(997));
        assert_eq!(totals.tax_price, Price::from_rupees(179));
        // 18% of 925 = 166.5 -> 167
        let totals = OrderTotals::from_subtotal(Price::from_rupees(925));
        assert_eq!(totals.tax_price, Price::from_rupees(167));
    }

    #[test]
    fn test_razorpay_order_deserialization() {
        let order: RazorpayOrder = serde_json::from_str(
            r#"{"id": "order_N5jk2l", "amount": 122900, "currency": "INR"}"#,
        )
        .unwrap();
        assert_eq!(order.amount, 122_900);
        assert_eq!(order.currency, CurrencyCode::INR);
        assert_eq!(order.currency.to_string(), "INR");
    }

    #[test]
    fn test_shipping_address_validation() {
        let mut address = ShippingAddress {
            full_name: "Arjun Mehta".to_owned(),
            phone: "9876543210".to_owned(),
            address: "14 Linking Road".to_owned(),
            city: "Mumbai".to_owned(),
            state: "Maharashtra".to_owned(),
            pincode: "400050".to_owned(),
        };
        assert!(address.validate().is_ok());

        address.city = "  ".to_owned();
        assert_eq!(address.validate(), Err("city"));
    }

    #[test]
    fn test_order_deserialization() {
        let order: Order = serde_json::from_str(
            r#"{
                "_id": "o1",
                "orderItems": [{
                    "product": "p1",
                    "name": "Oversized Saint Tee",
                    "price": 999,
                    "quantity": 1,
                    "size": "M"
                }],
                "shippingAddress": {
                    "fullName": "Arjun Mehta",
                    "phone": "9876543210",
                    "address": "14 Linking Road",
                    "city": "Mumbai",
                    "state": "Maharashtra",
                    "pincode": "400050"
                },
                "itemsPrice": 999,
                "shippingPrice": 50,
                "taxPrice": 180,
                "totalPrice": 1229,
                "status": "Payment Failed",
                "isPaid": false,
                "createdAt": "2026-07-12T09:30:00.000Z"
            }"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::PaymentFailed);
        assert_eq!(order.total_price, Price::from_rupees(1229));
        assert_eq!(order.order_items.len(), 1);
    }
}
