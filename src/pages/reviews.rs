use actix_web::{web, HttpResponse};

use crate::models::Recommendation;
use crate::pages::layout::{page, stars};
use crate::services::recommendation_service;
use crate::state::AppState;
use crate::utils::html::{escape, money};

fn review_card(review: &Recommendation) -> String {
    let product = &review.product;
    format!(
        "<article class=\"panel\"><div class=\"panel-head\"><strong>{}</strong><span class=\"stars\">{}</span></div>\n\
         <h3>{}</h3><p class=\"muted\">{} · {}</p><p>{}</p>\n<p class=\"muted\">Rated {} out of 5 stars</p></article>\n",
        escape(&review.user.full_name()),
        stars(i64::from(review.rating)),
        escape(&product.product_name),
        escape(&product.category),
        money(product.price),
        escape(&product.description),
        review.rating
    )
}

/// GET /recommendations
pub async fn reviews_page(state: web::Data<AppState>) -> HttpResponse {
    log::info!("⭐ GET /recommendations");
    let reviews = match recommendation_service::get_all_recommendations(&state.client).await {
        Ok(reviews) => reviews,
        Err(e) => {
            log::error!("❌ Error loading recommendations: {}", e);
            Vec::new()
        }
    };

    let mut body = String::from(
        "<h1>Customer Reviews</h1>\n<p class=\"muted\">See what our customers are saying about our products.</p>\n",
    );
    if reviews.is_empty() {
        body.push_str("<p class=\"empty\">No reviews yet.</p>\n");
    } else {
        body.push_str("<div class=\"grid\">\n");
        for review in &reviews {
            body.push_str(&review_card(review));
        }
        body.push_str("</div>\n");
    }
    page("Reviews", &body)
}
