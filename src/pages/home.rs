use actix_web::{web, HttpResponse};

use crate::pages::layout::page;
use crate::pages::products::product_card;
use crate::services::product_service;
use crate::state::AppState;

const FEATURED_COUNT: usize = 4;

/// GET /
pub async fn home_page(state: web::Data<AppState>) -> HttpResponse {
    let featured = match product_service::get_all_products(&state.client).await {
        Ok(mut products) => {
            products.truncate(FEATURED_COUNT);
            products
        }
        Err(e) => {
            log::error!("❌ Error loading featured products: {}", e);
            Vec::new()
        }
    };

    let mut body = String::from(
        "<section class=\"panel\"><h1>E-commerce Microservices Platform</h1>\
         <p class=\"muted\">Discover premium products, personalized recommendations, and seamless shopping experiences.</p>\
         <a class=\"button primary\" href=\"/products\">Browse Products</a> <a class=\"button\" href=\"/recommendations\">View Reviews</a></section>\n\
         <h2>Featured Products</h2>\n<div class=\"grid\">\n",
    );
    for product in &featured {
        body.push_str(&product_card(product));
    }
    body.push_str("</div>\n<p><a class=\"button\" href=\"/products\">View All Products</a></p>\n");

    page("Home", &body)
}
