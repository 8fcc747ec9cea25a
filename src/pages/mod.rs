use actix_web::web;
use serde::Deserialize;

pub mod admin;
pub mod cart;
pub mod home;
pub mod layout;
pub mod products;
pub mod profile;
pub mod register;
pub mod reviews;

/// `?modal=create` opens an empty form, `?edit={id}` opens it on a row.
#[derive(Debug, Default, Deserialize)]
pub struct ModalQuery {
    pub modal: Option<String>,
    pub edit: Option<i64>,
}

impl ModalQuery {
    pub fn wants_create(&self) -> bool {
        self.edit.is_none() && self.modal.as_deref() == Some("create")
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // ==================== STOREFRONT ====================
        .route("/", web::get().to(home::home_page))
        .route("/products", web::get().to(products::products_page))
        .route("/recommendations", web::get().to(reviews::reviews_page))
        .service(
            web::scope("/cart")
                .route("", web::get().to(cart::cart_page))
                .route("/add/{product_id}", web::post().to(cart::add_to_cart))
                .route("/{item_id}/quantity", web::post().to(cart::update_quantity))
                .route("/{item_id}/remove", web::post().to(cart::remove_item)),
        )
        .route("/register", web::get().to(register::register_page))
        .route("/register", web::post().to(register::register))
        .service(
            web::scope("/profile")
                .route("", web::get().to(profile::profile_page))
                .route("", web::post().to(profile::save_profile)),
        )
        // ==================== ADMIN ====================
        .route("/admin", web::get().to(admin::dashboard::dashboard_page))
        .service(
            web::scope("/admin/users")
                .route("", web::get().to(admin::users::users_page))
                .route("/save", web::post().to(admin::users::create_user))
                .route("/{id}/save", web::post().to(admin::users::update_user))
                .route("/delete/cancel", web::post().to(admin::users::cancel_delete))
                .route("/{id}/delete", web::post().to(admin::users::delete_user)),
        )
        .service(
            web::scope("/admin/products")
                .route("", web::get().to(admin::products::products_page))
                .route("/save", web::post().to(admin::products::create_product))
                .route("/{id}/save", web::post().to(admin::products::update_product))
                .route("/delete/cancel", web::post().to(admin::products::cancel_delete))
                .route("/{id}/delete", web::post().to(admin::products::delete_product)),
        )
        .service(
            web::scope("/admin/recommendations")
                .route("", web::get().to(admin::recommendations::recommendations_page))
                .route("/save", web::post().to(admin::recommendations::create_recommendation))
                .route("/delete/cancel", web::post().to(admin::recommendations::cancel_delete))
                .route("/{id}/delete", web::post().to(admin::recommendations::delete_recommendation)),
        )
        .service(
            web::scope("/admin/orders")
                .route("", web::get().to(admin::orders::orders_page))
                .route("/{id}/advance", web::post().to(admin::orders::advance_status)),
        );
}
