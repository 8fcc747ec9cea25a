use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::models::Product;
use crate::pages::layout::page;
use crate::services::product_service::{self, categories, ProductFilter, ALL_CATEGORIES};
use crate::state::AppState;
use crate::utils::html::{escape, money};

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Card with an "Add to Cart" button; shared with the home page.
pub fn product_card(product: &Product) -> String {
    let image = product
        .image_url
        .as_deref()
        .map(|url| format!("<img src=\"{}\" alt=\"{}\" width=\"220\">", escape(url), escape(&product.product_name)))
        .unwrap_or_default();
    let stock = if product.availability > 0 {
        format!("{} in stock", product.availability)
    } else {
        "Out of stock".to_string()
    };

    format!(
        "<article class=\"panel\">{}<h3>{}</h3><p class=\"muted\">{}</p><p>{}</p><p><strong>{}</strong> <span class=\"muted\">{}</span></p>\
         <form method=\"post\" action=\"/cart/add/{}\"><button class=\"button primary\" type=\"submit\">Add to Cart</button></form></article>\n",
        image,
        escape(&product.product_name),
        escape(&product.category),
        escape(&product.description),
        money(product.price),
        stock,
        product.id
    )
}

fn summary(shown: usize, total: usize, filter: &ProductFilter) -> String {
    let mut text = format!("Showing {} of {} products", shown, total);
    if let Some(category) = &filter.category {
        text.push_str(&format!(" in {}", category));
    }
    if !filter.search.is_empty() {
        text.push_str(&format!(" matching \"{}\"", filter.search));
    }
    text
}

/// GET /products?category=..&search=..
pub async fn products_page(
    state: web::Data<AppState>,
    query: web::Query<BrowseQuery>,
) -> HttpResponse {
    log::info!("🛍️  GET /products");
    let products = match product_service::get_all_products(&state.client).await {
        Ok(products) => products,
        Err(e) => {
            log::error!("❌ Error loading products: {}", e);
            Vec::new()
        }
    };

    let filter = ProductFilter::new(query.category.as_deref(), query.search.as_deref());
    let filtered = filter.apply(&products);
    let selected = filter.category.as_deref().unwrap_or(ALL_CATEGORIES);

    let mut body = String::from("<h1>Products</h1>\n<form class=\"panel\" method=\"get\" action=\"/products\">");
    body.push_str(&format!(
        "<input type=\"text\" name=\"search\" placeholder=\"Search products...\" value=\"{}\"> <select name=\"category\">",
        escape(&filter.search)
    ));
    for category in categories(&products) {
        let marker = if category == selected { " selected" } else { "" };
        body.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(&category),
            marker
        ));
    }
    body.push_str("</select> <button type=\"submit\">Filter</button></form>\n");

    body.push_str(&format!(
        "<p class=\"muted\">{}</p>\n",
        escape(&summary(filtered.len(), products.len(), &filter))
    ));

    if filtered.is_empty() {
        body.push_str("<p class=\"empty\">No products found. Try adjusting your search or filter criteria.</p>\n");
    } else {
        body.push_str("<div class=\"grid\">\n");
        for product in filtered {
            body.push_str(&product_card(product));
        }
        body.push_str("</div>\n");
    }

    page("Products", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages;
    use crate::test_support::MockCollaborators;
    use actix_web::test::{call_and_read_body, init_service, TestRequest};
    use actix_web::App;

    #[test]
    fn test_summary() {
        let filter = ProductFilter::new(Some("Electronics"), Some("Pro"));
        assert_eq!(
            summary(2, 5, &filter),
            "Showing 2 of 5 products in Electronics matching \"Pro\""
        );
        assert_eq!(summary(5, 5, &ProductFilter::default()), "Showing 5 of 5 products");
    }

    #[actix_web::test]
    async fn test_filtered_listing() {
        let mock = MockCollaborators::start().await;
        let state = web::Data::new(AppState::new(mock.client(), 1, None));
        let app = init_service(App::new().app_data(state.clone()).configure(pages::configure)).await;

        let req = TestRequest::get()
            .uri("/products?category=Electronics&search=Pro")
            .to_request();
        let html = String::from_utf8(call_and_read_body(&app, req).await.to_vec()).unwrap();

        assert!(html.contains("iPhone 15 Pro"));
        assert!(html.contains("MacBook Pro"));
        assert!(!html.contains("Coffee Maker"));
        assert!(!html.contains("Wireless Headphones"));
        assert!(html.contains("Showing 2 of 5 products in Electronics"));
        assert!(html.contains("<option value=\"Electronics\" selected>"));
    }
}
