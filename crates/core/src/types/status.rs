//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The backend spells these as title-case phrases on the wire, including the
/// two-word `"Payment Failed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(rename = "Payment Failed")]
    PaymentFailed,
}

impl OrderStatus {
    /// Whether the order has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::PaymentFailed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::PaymentFailed => write!(f, "Payment Failed"),
        }
    }
}
