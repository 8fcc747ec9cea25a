use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Product, Record};

pub const STATUS_PAYMENT_EXPECTED: &str = "PAYMENT_EXPECTED";
pub const STATUS_PROCESSING: &str = "PROCESSING";
pub const STATUS_COMPLETED: &str = "COMPLETED";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: String, // PAYMENT_EXPECTED, PROCESSING, COMPLETED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product: Product,
    pub quantity: u32,
    pub price: f64,
}

impl Order {
    /// Status the "advance" action moves this order to.
    pub fn next_status(&self) -> &'static str {
        next_status(&self.status)
    }
}

pub fn next_status(current: &str) -> &'static str {
    if current == STATUS_PAYMENT_EXPECTED {
        STATUS_PROCESSING
    } else {
        STATUS_COMPLETED
    }
}

impl Record for Order {
    fn record_id(&self) -> i64 {
        self.id
    }
}
