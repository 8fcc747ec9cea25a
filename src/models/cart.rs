use serde::{Deserialize, Serialize};

use super::{Product, Record};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub product: Product,
    pub quantity: u32,
    pub user_id: i64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

impl Record for CartItem {
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Cart held for the running session. Never sent to the shop service.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    next_id: i64,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one unit of `product`, merging with an existing line for the same product.
    pub fn add(&mut self, product: Product, user_id: i64) -> &CartItem {
        if let Some(pos) = self.items.iter().position(|item| item.product.id == product.id) {
            self.items[pos].quantity += 1;
            return &self.items[pos];
        }

        self.next_id += 1;
        self.items.push(CartItem {
            id: self.next_id,
            product,
            quantity: 1,
            user_id,
        });
        &self.items[self.items.len() - 1]
    }

    /// Sets the quantity of a line; zero or below removes it.
    pub fn update_quantity(&mut self, item_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove(item_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn remove(&mut self, item_id: i64) {
        self.items.retain(|item| item.id != item_id);
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
