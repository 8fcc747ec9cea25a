use actix_web::{web, HttpResponse};

use crate::pages::layout::page;
use crate::services::{order_service, product_service, recommendation_service, user_service};
use crate::state::AppState;
use crate::utils::AppError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub recommendations: usize,
}

fn count<T>(what: &str, result: Result<Vec<T>, AppError>) -> usize {
    match result {
        Ok(items) => items.len(),
        Err(e) => {
            log::error!("❌ Failed to count {}: {}", what, e);
            0
        }
    }
}

/// Counts for each resource; a failed fetch counts as zero.
pub async fn load_stats(state: &AppState) -> DashboardStats {
    let (users, products, orders, recommendations) = futures::join!(
        user_service::get_all_users(&state.client),
        product_service::get_all_products(&state.client),
        order_service::get_all_orders(),
        recommendation_service::get_all_recommendations(&state.client),
    );

    DashboardStats {
        users: count("users", users),
        products: count("products", products),
        orders: count("orders", orders),
        recommendations: count("recommendations", recommendations),
    }
}

/// GET /admin
pub async fn dashboard_page(state: web::Data<AppState>) -> HttpResponse {
    log::info!("📊 GET /admin");
    let stats = load_stats(&state).await;

    let cards = [
        ("Users", stats.users, "/admin/users", "Manage user accounts and roles"),
        ("Products", stats.products, "/admin/products", "Manage the product catalog"),
        ("Orders", stats.orders, "/admin/orders", "Track and advance orders"),
        (
            "Recommendations",
            stats.recommendations,
            "/admin/recommendations",
            "Moderate product reviews",
        ),
    ];

    let mut body = String::from("<h1>Admin Dashboard</h1>\n<div class=\"grid\">\n");
    for (title, value, href, description) in cards {
        body.push_str(&format!(
            "<section class=\"panel\"><h3>{}</h3><p class=\"stat\">{}</p><p class=\"muted\">{}</p><a class=\"button\" href=\"{}\">Manage {}</a></section>\n",
            title, value, description, href, title
        ));
    }
    body.push_str("</div>\n");

    page("Admin Dashboard", &body)
}
