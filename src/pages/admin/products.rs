use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::components::{
    Column, ConfirmOutcome, DeleteConfirm, EditAction, FormField, FormModal, Table,
};
use crate::models::Product;
use crate::pages::layout::{page, see_other};
use crate::pages::ModalQuery;
use crate::services::product_service;
use crate::state::{AppState, ResourceTable};
use crate::utils::html::escape;

const BASE_PATH: &str = "/admin/products";

fn columns() -> Vec<Column<Product>> {
    vec![
        Column::path("id", "ID"),
        Column::path("productName", "Product Name"),
        Column::path("price", "Price").render(|value, _| {
            format!("${:.2}", value.and_then(Value::as_f64).unwrap_or(0.0))
        }),
        Column::path("category", "Category"),
        Column::path("availability", "Stock").render(|value, _| {
            format!("{} units", value.and_then(Value::as_i64).unwrap_or(0))
        }),
        Column::path("discription", "Description").render(|value, _| {
            truncate(value.and_then(Value::as_str).unwrap_or_default(), 50)
        }),
    ]
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

fn form_fields() -> Vec<FormField> {
    vec![
        FormField::text("productName", "Product Name").required(true),
        FormField::number("price", "Price").required(true),
        FormField::text("category", "Category").required(true),
        FormField::number("availability", "Stock Quantity").required(true),
        FormField::textarea("discription", "Description")
            .placeholder("Short product description"),
    ]
}

fn table() -> Table<Product> {
    Table::new("Products Management", BASE_PATH, columns())
        .with_edit(EditAction::OpenForm)
        .with_delete()
        .with_create()
}

async fn fetch_products(state: &AppState) -> Vec<Product> {
    match product_service::get_all_products(&state.client).await {
        Ok(products) => products,
        Err(e) => {
            log::error!("❌ Failed to fetch products: {}", e);
            Vec::new()
        }
    }
}

/// Server-side catalog lookups; `name` wins when both are given.
#[derive(Debug, Default, Deserialize)]
pub struct ProductLookup {
    pub name: Option<String>,
    pub category: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn lookup_form(lookup: &ProductLookup) -> String {
    format!(
        "<form class=\"panel\" method=\"get\" action=\"{0}\"><input type=\"text\" name=\"name\" placeholder=\"Product name\" value=\"{1}\"> \
         <input type=\"text\" name=\"category\" placeholder=\"Category\" value=\"{2}\"> \
         <button type=\"submit\">Find</button> <a class=\"button\" href=\"{0}\">Show all</a></form>\n",
        BASE_PATH,
        escape(non_blank(&lookup.name).unwrap_or_default()),
        escape(non_blank(&lookup.category).unwrap_or_default())
    )
}

async fn lookup_products(state: &AppState, lookup: &ProductLookup) -> Vec<Product> {
    let result = match (non_blank(&lookup.name), non_blank(&lookup.category)) {
        (Some(name), _) => product_service::get_products_by_name(&state.client, name).await,
        (None, Some(category)) => {
            product_service::get_products_by_category(&state.client, category).await
        }
        (None, None) => return fetch_products(state).await,
    };

    match result {
        Ok(products) => products,
        Err(e) => {
            log::error!("❌ Product lookup failed: {}", e);
            Vec::new()
        }
    }
}

async fn render(state: &AppState, modal: Option<(FormModal, String)>) -> HttpResponse {
    let products = fetch_products(state).await;
    render_with(state, &products, modal).await
}

async fn render_with(
    state: &AppState,
    products: &[Product],
    modal: Option<(FormModal, String)>,
) -> HttpResponse {
    render_with_lookup(state, products, modal, &ProductLookup::default()).await
}

async fn render_with_lookup(
    state: &AppState,
    products: &[Product],
    modal: Option<(FormModal, String)>,
    lookup: &ProductLookup,
) -> HttpResponse {
    let armed = state.armed_row(ResourceTable::Products).await;
    let mut body = lookup_form(lookup);
    body.push_str(&table().render_html(products, armed));
    if let Some((modal, action)) = modal {
        body.push_str(&modal.render_html(&action, BASE_PATH));
    }
    page("Products Management", &body)
}

/// GET /admin/products
pub async fn products_page(
    state: web::Data<AppState>,
    query: web::Query<ModalQuery>,
    lookup: web::Query<ProductLookup>,
) -> HttpResponse {
    log::info!("📦 GET {}", BASE_PATH);
    let products = lookup_products(&state, &lookup).await;

    let modal = if let Some(id) = query.edit {
        products.iter().find(|p| p.id == id).and_then(|product| {
            let initial = serde_json::to_value(product).ok()?;
            Some((
                FormModal::open_with("Edit Product", form_fields(), &initial),
                format!("{}/{}/save", BASE_PATH, id),
            ))
        })
    } else if query.wants_create() {
        Some((
            FormModal::open("Create Product", form_fields()),
            format!("{}/save", BASE_PATH),
        ))
    } else {
        None
    };

    render_with_lookup(&state, &products, modal, &lookup).await
}

/// POST /admin/products/save
pub async fn create_product(
    state: web::Data<AppState>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let submitted = FormModal::collect(&form_fields(), &form);
    match product_service::create_product(&state.client, &submitted).await {
        Ok(_) => see_other(BASE_PATH),
        Err(e) => {
            log::error!("❌ Failed to save product: {}", e);
            let modal = reopen("Create Product", submitted, false);
            render(&state, Some((modal, format!("{}/save", BASE_PATH)))).await
        }
    }
}

/// POST /admin/products/{id}/save
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let id = path.into_inner();
    let submitted = FormModal::collect(&form_fields(), &form);
    match product_service::update_product(&state.client, id, &submitted).await {
        Ok(_) => see_other(BASE_PATH),
        Err(e) => {
            log::error!("❌ Failed to save product {}: {}", id, e);
            let modal = reopen("Edit Product", submitted, true);
            render(&state, Some((modal, format!("{}/{}/save", BASE_PATH, id)))).await
        }
    }
}

fn reopen(title: &str, submitted: Map<String, Value>, editing: bool) -> FormModal {
    FormModal::reopen(title, form_fields(), submitted, editing)
}

/// POST /admin/products/{id}/delete (first press arms, second deletes)
pub async fn delete_product(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let outcome = state
        .with_confirm(ResourceTable::Products, |confirm: &mut DeleteConfirm| {
            confirm.activate(id)
        })
        .await;

    if let ConfirmOutcome::Fire(id) = outcome {
        if let Err(e) = product_service::delete_product(&state.client, id).await {
            log::error!("❌ Failed to delete product {}: {}", id, e);
        }
    }
    see_other(BASE_PATH)
}

/// POST /admin/products/delete/cancel
pub async fn cancel_delete(state: web::Data<AppState>) -> HttpResponse {
    state
        .with_confirm(ResourceTable::Products, DeleteConfirm::disarm)
        .await;
    see_other(BASE_PATH)
}
