use crate::models::Order;
use crate::utils::AppError;

// ==================== SHOP SERVICE (ORDERS) ====================
// The shop service exposes no order administration yet: listing always
// yields nothing and status updates always fail. No network call is made.

pub async fn get_all_orders() -> Result<Vec<Order>, AppError> {
    log::debug!("📋 Order listing is not wired to the shop service");
    Ok(Vec::new())
}

pub async fn update_order_status(id: i64, status: &str) -> Result<Order, AppError> {
    log::debug!("📋 Requested status {} for order {}", status, id);
    Err(AppError::NotImplemented("Order status update"))
}
