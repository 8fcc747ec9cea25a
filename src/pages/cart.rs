use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::models::Cart;
use crate::pages::layout::{page, see_other};
use crate::services::product_service;
use crate::state::AppState;
use crate::utils::html::{escape, money};

const CART_PATH: &str = "/cart";

#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: i64,
}

fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "<section class=\"panel\"><h2>Your cart is empty</h2>\
                <p class=\"muted\">Add some products to get started.</p>\
                <a class=\"button primary\" href=\"/products\">Browse Products</a></section>\n"
            .to_string();
    }

    let mut html = String::from(
        "<section class=\"panel\"><table>\n<thead><tr><th>Product</th><th>Price</th><th>Quantity</th><th>Subtotal</th><th></th></tr></thead>\n<tbody>\n",
    );
    for item in cart.items() {
        let quantity_form = |quantity: i64, label: &str| {
            format!(
                "<form class=\"inline\" method=\"post\" action=\"{}/{}/quantity\"><input type=\"hidden\" name=\"quantity\" value=\"{}\"><button type=\"submit\">{}</button></form>",
                CART_PATH, item.id, quantity, label
            )
        };
        let current = i64::from(item.quantity);

        html.push_str(&format!(
            "<tr><td>{}<div class=\"muted\">{}</div></td><td>{}</td><td class=\"actions\">{} {} {}</td><td>{}</td>\
             <td><form class=\"inline\" method=\"post\" action=\"{}/{}/remove\"><button class=\"danger\" type=\"submit\">Remove</button></form></td></tr>\n",
            escape(&item.product.product_name),
            escape(&item.product.category),
            money(item.product.price),
            quantity_form(current - 1, "−"),
            item.quantity,
            quantity_form(current + 1, "+"),
            money(item.line_total()),
            CART_PATH,
            item.id
        ));
    }
    html.push_str("</tbody>\n</table></section>\n");

    html.push_str(&format!(
        "<section class=\"panel\"><h2>Order Summary</h2><p>Items: {}</p><p><strong>Total: {}</strong></p>\
         <a class=\"button\" href=\"/products\">Continue Shopping</a></section>\n",
        cart.total_items(),
        money(cart.total_price())
    ));
    html
}

/// GET /cart
pub async fn cart_page(state: web::Data<AppState>) -> HttpResponse {
    let body = {
        let cart = state.cart.lock().await;
        format!("<h1>Shopping Cart</h1>\n{}", render_cart(&cart))
    };
    page("Shopping Cart", &body)
}

/// POST /cart/add/{product_id}
pub async fn add_to_cart(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let product_id = path.into_inner();

    match product_service::get_product_by_id(&state.client, product_id).await {
        Ok(product) => {
            let mut cart = state.cart.lock().await;
            let item = cart.add(product, state.profile_user_id);
            log::info!(
                "🛒 Added {} to cart (quantity {})",
                item.product.product_name,
                item.quantity
            );
        }
        Err(e) => log::error!("❌ Error adding to cart: {}", e),
    }
    see_other(CART_PATH)
}

/// POST /cart/{item_id}/quantity
pub async fn update_quantity(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<QuantityForm>,
) -> HttpResponse {
    state
        .cart
        .lock()
        .await
        .update_quantity(path.into_inner(), form.quantity);
    see_other(CART_PATH)
}

/// POST /cart/{item_id}/remove
pub async fn remove_item(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    state.cart.lock().await.remove(path.into_inner());
    see_other(CART_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages;
    use crate::test_support::{sample_products, unreachable_client, MockCollaborators};
    use actix_web::test::{call_and_read_body, call_service, init_service, TestRequest};
    use actix_web::{http::StatusCode, App};

    #[test]
    fn test_empty_cart_links_to_products() {
        let html = render_cart(&Cart::default());
        assert!(html.contains("Your cart is empty"));
        assert!(html.contains("href=\"/products\""));
    }

    #[test]
    fn test_cart_summary() {
        let mut cart = Cart::default();
        let products = sample_products();
        cart.add(products[4].clone(), 1);
        cart.add(products[4].clone(), 1);

        let html = render_cart(&cart);
        assert!(html.contains("Items: 2"));
        assert!(html.contains("Total: $179.00"));
        assert!(html.contains("action=\"/cart/1/quantity\""));
        assert!(html.contains("value=\"1\""));
        assert!(html.contains("value=\"3\""));
    }

    #[actix_web::test]
    async fn test_add_update_and_remove() {
        let mock = MockCollaborators::start().await;
        let state = web::Data::new(AppState::new(mock.client(), 7, None));
        let app = init_service(App::new().app_data(state.clone()).configure(pages::configure)).await;

        for _ in 0..2 {
            let req = TestRequest::post().uri("/cart/add/2").to_request();
            let resp = call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        }
        {
            let cart = state.cart.lock().await;
            assert_eq!(cart.items().len(), 1);
            assert_eq!(cart.items()[0].quantity, 2);
            assert_eq!(cart.items()[0].user_id, 7);
        }

        let req = TestRequest::get().uri("/cart").to_request();
        let html = String::from_utf8(call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("iPhone 15 Pro"));
        assert!(html.contains("$1999.98"));

        let req = TestRequest::post()
            .uri("/cart/1/quantity")
            .set_form([("quantity", "0")])
            .to_request();
        call_service(&app, req).await;
        assert!(state.cart.lock().await.is_empty());

        let req = TestRequest::post().uri("/cart/add/3").to_request();
        call_service(&app, req).await;
        let id = state.cart.lock().await.items()[0].id;
        let req = TestRequest::post().uri(&format!("/cart/{}/remove", id)).to_request();
        call_service(&app, req).await;
        assert!(state.cart.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_failed_lookup_leaves_cart_unchanged() {
        let state = web::Data::new(AppState::new(unreachable_client(), 1, None));
        let resp = add_to_cart(state.clone(), web::Path::from(1)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(state.cart.lock().await.is_empty());
    }
}
