use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::components::{
    Column, ConfirmOutcome, DeleteConfirm, FormField, FormModal, SelectOption, Table,
};
use crate::models::{Product, Recommendation, User};
use crate::pages::layout::{page, see_other, stars};
use crate::pages::ModalQuery;
use crate::services::{product_service, recommendation_service, user_service};
use crate::state::{AppState, ResourceTable};
use crate::utils::AppError;

const BASE_PATH: &str = "/admin/recommendations";

#[derive(Default)]
struct PageData {
    recommendations: Vec<Recommendation>,
    users: Vec<User>,
    products: Vec<Product>,
}

fn columns() -> Vec<Column<Recommendation>> {
    vec![
        Column::path("id", "ID"),
        Column::path("user.userName", "User").render(|v, _| {
            v.and_then(Value::as_str).unwrap_or("Unknown User").to_string()
        }),
        Column::path("product.productName", "Product").render(|v, _| {
            v.and_then(Value::as_str).unwrap_or("Unknown Product").to_string()
        }),
        Column::path("rating", "Rating")
            .render(|v, _| stars(v.and_then(Value::as_i64).unwrap_or(0))),
    ]
}

fn form_fields(users: &[User], products: &[Product]) -> Vec<FormField> {
    let ratings = (1..=5)
        .map(|n| {
            let label = if n == 1 {
                "1 Star".to_string()
            } else {
                format!("{} Stars", n)
            };
            SelectOption::new(n, label)
        })
        .collect();

    vec![
        FormField::select(
            "userId",
            "User",
            users
                .iter()
                .map(|u| SelectOption::new(u.id, u.user_name.clone()))
                .collect(),
        )
        .required(true),
        FormField::select(
            "productId",
            "Product",
            products
                .iter()
                .map(|p| SelectOption::new(p.id, p.product_name.clone()))
                .collect(),
        )
        .required(true),
        FormField::select("rating", "Rating", ratings).required(true),
    ]
}

fn table() -> Table<Recommendation> {
    Table::new("Recommendations Management", BASE_PATH, columns())
        .with_delete()
        .with_create()
}

/// Fetches all three lists together; any failure leaves every list empty.
async fn fetch_data(state: &AppState) -> PageData {
    let result = futures::try_join!(
        recommendation_service::get_all_recommendations(&state.client),
        user_service::get_all_users(&state.client),
        product_service::get_all_products(&state.client),
    );

    match result {
        Ok((recommendations, users, products)) => PageData {
            recommendations,
            users,
            products,
        },
        Err(e) => {
            log::error!("❌ Failed to fetch data: {}", e);
            PageData::default()
        }
    }
}

async fn render(state: &AppState, data: &PageData, modal: Option<FormModal>) -> HttpResponse {
    let armed = state.armed_row(ResourceTable::Recommendations).await;
    let mut body = table().render_html(&data.recommendations, armed);
    if let Some(modal) = modal {
        body.push_str(&modal.render_html(&format!("{}/save", BASE_PATH), BASE_PATH));
    }
    page("Recommendations Management", &body)
}

/// GET /admin/recommendations
pub async fn recommendations_page(
    state: web::Data<AppState>,
    query: web::Query<ModalQuery>,
) -> HttpResponse {
    log::info!("⭐ GET {}", BASE_PATH);
    let data = fetch_data(&state).await;
    let modal = query.wants_create().then(|| {
        FormModal::open(
            "Create Recommendation",
            form_fields(&data.users, &data.products),
        )
    });
    render(&state, &data, modal).await
}

/// Parses a submitted select value; out-of-range numbers are rejected, never wrapped.
fn parse_number<T: FromStr>(values: &Map<String, Value>, name: &str) -> Result<T, AppError> {
    let raw = values.get(name).and_then(Value::as_str).unwrap_or_default();
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("{} '{}' is not a number", name, raw)))
}

/// POST /admin/recommendations/save
pub async fn create_recommendation(
    state: web::Data<AppState>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    // Option lists only matter for re-rendering, so none are needed to collect
    let submitted = FormModal::collect(&form_fields(&[], &[]), &form);

    let result = async {
        let user_id: i64 = parse_number(&submitted, "userId")?;
        let product_id: i64 = parse_number(&submitted, "productId")?;
        let rating: i32 = parse_number(&submitted, "rating")?;
        recommendation_service::create_recommendation(&state.client, user_id, product_id, rating)
            .await
    }
    .await;

    match result {
        Ok(_) => see_other(BASE_PATH),
        Err(e) => {
            log::error!("❌ Failed to create recommendation: {}", e);
            let data = fetch_data(&state).await;
            let modal = FormModal::reopen(
                "Create Recommendation",
                form_fields(&data.users, &data.products),
                submitted,
                false,
            );
            render(&state, &data, Some(modal)).await
        }
    }
}

/// POST /admin/recommendations/{id}/delete
pub async fn delete_recommendation(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    let outcome = state
        .with_confirm(ResourceTable::Recommendations, |confirm| confirm.activate(id))
        .await;

    if let ConfirmOutcome::Fire(id) = outcome {
        if let Err(e) = recommendation_service::delete_recommendation(&state.client, id).await {
            log::error!("❌ Failed to delete recommendation {}: {}", id, e);
        }
    }
    see_other(BASE_PATH)
}

/// POST /admin/recommendations/delete/cancel
pub async fn cancel_delete(state: web::Data<AppState>) -> HttpResponse {
    state
        .with_confirm(ResourceTable::Recommendations, DeleteConfirm::disarm)
        .await;
    see_other(BASE_PATH)
}
