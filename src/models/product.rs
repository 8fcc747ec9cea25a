use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    // The catalog service spells this key "discription"
    #[serde(rename = "discription", default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub availability: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Record for Product {
    fn record_id(&self) -> i64 {
        self.id
    }
}
