use serde::{Deserialize, Serialize};

use super::{Product, Record, User};

/// A review: embeds the full product and user rather than foreign keys.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub rating: i32,
    pub product: Product,
    pub user: User,
}

impl Record for Recommendation {
    fn record_id(&self) -> i64 {
        self.id
    }
}
