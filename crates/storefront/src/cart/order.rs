//! Order submission receipt.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Message shown to the shopper after a successful submit.
pub const ORDER_SUBMITTED_MESSAGE: &str = "Your order has been submitted!";

/// Receipt for a submitted cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Random reference for the submitted order.
    pub reference: Uuid,
    /// When the order was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Total quantity across all submitted lines.
    pub item_count: u64,
    /// Total price of the submitted cart.
    pub total: Decimal,
}

impl OrderConfirmation {
    pub(crate) fn new(item_count: u64, total: Decimal) -> Self {
        Self {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            item_count,
            total,
        }
    }

    /// Message to show the shopper.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        ORDER_SUBMITTED_MESSAGE
    }
}
