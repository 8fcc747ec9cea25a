use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::components::{Column, EditAction, Table};
use crate::models::Order;
use crate::pages::layout::{page, see_other};
use crate::services::order_service;
use crate::utils::html::money;

const BASE_PATH: &str = "/admin/orders";

fn columns() -> Vec<Column<Order>> {
    vec![
        Column::path("id", "Order ID"),
        Column::path("userId", "User ID"),
        Column::path("totalAmount", "Total")
            .render(|v, _| money(v.and_then(Value::as_f64).unwrap_or(0.0))),
        Column::path("status", "Status").render(|v, _| {
            v.and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("PENDING")
                .to_string()
        }),
        Column::field("Date", |order: &Order| {
            order
                .created_at
                .map(|at| Value::from(at.format("%Y-%m-%d").to_string()))
        })
        .render(|v, _| v.and_then(Value::as_str).unwrap_or("N/A").to_string()),
        Column::field("Items", |order: &Order| Some(Value::from(order.items.len())))
            .render(|v, _| format!("{} items", v.and_then(Value::as_u64).unwrap_or(0))),
    ]
}

fn table() -> Table<Order> {
    Table::new("Orders Management", BASE_PATH, columns()).with_edit(EditAction::Post {
        label: "Advance status",
        action: "advance",
    })
}

async fn fetch_orders() -> Vec<Order> {
    match order_service::get_all_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            log::error!("❌ Failed to fetch orders: {}", e);
            Vec::new()
        }
    }
}

/// GET /admin/orders
pub async fn orders_page() -> HttpResponse {
    log::info!("📋 GET {}", BASE_PATH);
    let orders = fetch_orders().await;

    let mut body = table().render_html(&orders, None);
    if orders.is_empty() {
        body.push_str(
            "<section class=\"panel\"><h3>No Orders Yet</h3>\
             <p class=\"muted\">Orders will appear here once customers start placing orders through the frontend.</p></section>\n",
        );
    }
    page("Orders Management", &body)
}

/// POST /admin/orders/{id}/advance
pub async fn advance_status(path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let orders = fetch_orders().await;

    match orders.iter().find(|order| order.id == id) {
        Some(order) => {
            let status = order.next_status();
            if let Err(e) = order_service::update_order_status(id, status).await {
                log::error!("❌ Failed to update order status: {}", e);
            }
        }
        None => log::warn!("⚠️  Order {} not found", id),
    }
    see_other(BASE_PATH)
}
