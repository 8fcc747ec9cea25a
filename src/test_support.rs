//! In-process stand-in for the users/catalog/review services, for tests.

use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Mutex;

use crate::models::{Product, Recommendation, User, UserDetails, UserRole};
use crate::services::ServiceClient;

pub fn sample_products() -> Vec<Product> {
    let product = |id: i64, name: &str, price: f64, description: &str, category: &str, stock: i64| {
        Product {
            id,
            product_name: name.to_string(),
            price,
            description: description.to_string(),
            category: category.to_string(),
            availability: stock,
            image_url: None,
        }
    };

    vec![
        product(
            1,
            "MacBook Pro 16\"",
            2499.99,
            "Powerful laptop with M3 Pro chip, 18GB RAM, and 512GB SSD. Perfect for professional work and creative tasks.",
            "Electronics",
            15,
        ),
        product(
            2,
            "iPhone 15 Pro",
            999.99,
            "Latest iPhone with titanium design, A17 Pro chip, and advanced camera system.",
            "Electronics",
            25,
        ),
        product(
            3,
            "Premium Leather Jacket",
            299.99,
            "Genuine leather jacket with modern cut and premium finish.",
            "Clothing",
            8,
        ),
        product(
            4,
            "Wireless Headphones",
            199.99,
            "High-quality wireless headphones with noise cancellation and 30-hour battery life.",
            "Electronics",
            0,
        ),
        product(
            5,
            "Coffee Maker",
            89.5,
            "Programmable coffee maker with thermal carafe.",
            "Home",
            12,
        ),
    ]
}

pub fn sample_users() -> Vec<User> {
    let details = |id: i64, first: &str, last: &str| UserDetails {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        phone: Some(format!("+1-555-01{:02}", id)),
        address: Some(format!("{} Main St", id * 100)),
    };
    let role = |id: i64, name: &str| UserRole {
        id,
        role_name: name.to_string(),
    };

    vec![
        User {
            id: 1,
            user_name: "johndoe".to_string(),
            user_password: None,
            active: 1,
            user_details: Some(details(1, "John", "Doe")),
            role: Some(role(2, "USER")),
        },
        User {
            id: 2,
            user_name: "janesmith".to_string(),
            user_password: None,
            active: 1,
            user_details: Some(details(2, "Jane", "Smith")),
            role: Some(role(3, "PREMIUM_USER")),
        },
        User {
            id: 3,
            user_name: "mikejohnson".to_string(),
            user_password: None,
            active: 0,
            user_details: None,
            role: None,
        },
        User {
            id: 4,
            user_name: "sarahwilliams".to_string(),
            user_password: None,
            active: 1,
            user_details: Some(details(4, "Sarah", "Williams")),
            role: Some(role(1, "ADMIN")),
        },
    ]
}

struct MockData {
    users: Vec<User>,
    products: Vec<Product>,
    recommendations: Vec<Recommendation>,
    next_id: i64,
}

impl MockData {
    fn seeded() -> Self {
        let users = sample_users();
        let products = sample_products();
        let recommendations = vec![
            Recommendation {
                id: 1,
                rating: 5,
                product: products[0].clone(),
                user: users[0].clone(),
            },
            Recommendation {
                id: 2,
                rating: 4,
                product: products[2].clone(),
                user: users[1].clone(),
            },
        ];

        Self {
            users,
            products,
            recommendations,
            next_id: 100,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Store = web::Data<Mutex<MockData>>;

/// Handle to a running mock server; the server lives as long as the test runtime.
pub struct MockCollaborators {
    base_url: String,
}

impl MockCollaborators {
    pub async fn start() -> Self {
        let store: Store = web::Data::new(Mutex::new(MockData::seeded()));

        let server = HttpServer::new(move || App::new().app_data(store.clone()).configure(routes))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind mock collaborator server");
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        Self {
            base_url: format!("http://{}", addr),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> ServiceClient {
        ServiceClient::new(&self.base_url, None).expect("mock client")
    }
}

/// A client pointed at a port with nothing listening.
pub fn unreachable_client() -> ServiceClient {
    ServiceClient::new("http://127.0.0.1:9", None).expect("client")
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/accounts/users", web::get().to(list_users))
        .route("/api/accounts/users", web::post().to(create_user))
        .route("/api/accounts/registration", web::post().to(create_user))
        .route("/api/accounts/users/{id}", web::get().to(get_user))
        .route("/api/accounts/users/{id}", web::put().to(update_user))
        .route("/api/accounts/users/{id}", web::delete().to(delete_user))
        .route("/api/catalog/products", web::get().to(list_products))
        .route("/api/catalog/products/{id}", web::get().to(get_product))
        .route("/api/catalog/admin/products", web::post().to(create_product))
        .route("/api/catalog/admin/products/{id}", web::put().to(update_product))
        .route("/api/catalog/admin/products/{id}", web::delete().to(delete_product))
        .route("/api/review/recommendations", web::get().to(list_recommendations))
        .route(
            "/api/review/{user_id}/recommendations/{product_id}",
            web::post().to(create_recommendation),
        )
        .route(
            "/api/review/recommendations/{id}",
            web::delete().to(delete_recommendation),
        );
}

#[derive(Deserialize)]
struct NameQuery {
    name: Option<String>,
}

#[derive(Deserialize)]
struct ProductQuery {
    category: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationQuery {
    user_id: Option<i64>,
}

#[derive(Deserialize)]
struct RatingQuery {
    rating: i32,
}

fn active_flag(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n.as_i64().map(|n| n as i32),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

async fn list_users(store: Store, query: web::Query<NameQuery>) -> HttpResponse {
    let data = store.lock().unwrap();
    match &query.name {
        Some(name) => match data.users.iter().find(|u| &u.user_name == name) {
            Some(user) => HttpResponse::Ok().json(user),
            None => HttpResponse::NotFound().finish(),
        },
        None => HttpResponse::Ok().json(&data.users),
    }
}

async fn get_user(store: Store, id: web::Path<i64>) -> HttpResponse {
    let data = store.lock().unwrap();
    match data.users.iter().find(|u| u.id == *id) {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn create_user(store: Store, body: web::Json<Value>) -> HttpResponse {
    let Some(user_name) = body.get("userName").and_then(Value::as_str) else {
        return HttpResponse::BadRequest().finish();
    };
    let mut data = store.lock().unwrap();
    if data.users.iter().any(|u| u.user_name == user_name) {
        return HttpResponse::Conflict().finish();
    }
    let user = User {
        id: data.allocate_id(),
        user_name: user_name.to_string(),
        user_password: None,
        active: active_flag(body.get("active")).unwrap_or(1),
        user_details: body
            .get("userDetails")
            .and_then(|details| serde_json::from_value(details.clone()).ok()),
        role: None,
    };
    data.users.push(user.clone());
    HttpResponse::Ok().json(user)
}

async fn update_user(store: Store, id: web::Path<i64>, body: web::Json<Value>) -> HttpResponse {
    let mut data = store.lock().unwrap();
    let Some(user) = data.users.iter_mut().find(|u| u.id == *id) else {
        return HttpResponse::NotFound().finish();
    };
    if let Some(name) = body.get("userName").and_then(Value::as_str) {
        user.user_name = name.to_string();
    }
    if let Some(active) = active_flag(body.get("active")) {
        user.active = active;
    }
    HttpResponse::Ok().json(user.clone())
}

async fn delete_user(store: Store, id: web::Path<i64>) -> HttpResponse {
    let mut data = store.lock().unwrap();
    let before = data.users.len();
    data.users.retain(|u| u.id != *id);
    if data.users.len() == before {
        return HttpResponse::NotFound().finish();
    }
    HttpResponse::Ok().finish()
}

async fn list_products(store: Store, query: web::Query<ProductQuery>) -> HttpResponse {
    let data = store.lock().unwrap();
    let products: Vec<&Product> = data
        .products
        .iter()
        .filter(|p| query.category.as_ref().map_or(true, |c| &p.category == c))
        .filter(|p| query.name.as_ref().map_or(true, |n| &p.product_name == n))
        .collect();
    HttpResponse::Ok().json(products)
}

async fn get_product(store: Store, id: web::Path<i64>) -> HttpResponse {
    let data = store.lock().unwrap();
    match data.products.iter().find(|p| p.id == *id) {
        Some(product) => HttpResponse::Ok().json(product),
        None => HttpResponse::NotFound().finish(),
    }
}

fn product_from_body(id: i64, body: Value) -> Option<Product> {
    let mut object = body.as_object()?.clone();
    object.insert("id".to_string(), Value::from(id));
    serde_json::from_value(Value::Object(object)).ok()
}

async fn create_product(store: Store, body: web::Json<Value>) -> HttpResponse {
    let mut data = store.lock().unwrap();
    let id = data.allocate_id();
    match product_from_body(id, body.into_inner()) {
        Some(product) => {
            data.products.push(product.clone());
            HttpResponse::Ok().json(product)
        }
        None => HttpResponse::BadRequest().finish(),
    }
}

async fn update_product(store: Store, id: web::Path<i64>, body: web::Json<Value>) -> HttpResponse {
    let id = id.into_inner();
    let mut data = store.lock().unwrap();
    let Some(pos) = data.products.iter().position(|p| p.id == id) else {
        return HttpResponse::NotFound().finish();
    };
    match product_from_body(id, body.into_inner()) {
        Some(product) => {
            data.products[pos] = product.clone();
            HttpResponse::Ok().json(product)
        }
        None => HttpResponse::BadRequest().finish(),
    }
}

async fn delete_product(store: Store, id: web::Path<i64>) -> HttpResponse {
    let mut data = store.lock().unwrap();
    let before = data.products.len();
    data.products.retain(|p| p.id != *id);
    if data.products.len() == before {
        return HttpResponse::NotFound().finish();
    }
    HttpResponse::Ok().finish()
}

async fn list_recommendations(store: Store, query: web::Query<RecommendationQuery>) -> HttpResponse {
    let data = store.lock().unwrap();
    let recommendations: Vec<&Recommendation> = data
        .recommendations
        .iter()
        .filter(|r| query.user_id.map_or(true, |id| r.user.id == id))
        .collect();
    HttpResponse::Ok().json(recommendations)
}

async fn create_recommendation(
    store: Store,
    path: web::Path<(i64, i64)>,
    query: web::Query<RatingQuery>,
) -> HttpResponse {
    let (user_id, product_id) = path.into_inner();
    let mut data = store.lock().unwrap();
    let user = data.users.iter().find(|u| u.id == user_id).cloned();
    let product = data.products.iter().find(|p| p.id == product_id).cloned();
    let (Some(user), Some(product)) = (user, product) else {
        return HttpResponse::NotFound().finish();
    };
    let recommendation = Recommendation {
        id: data.allocate_id(),
        rating: query.rating,
        product,
        user,
    };
    data.recommendations.push(recommendation.clone());
    HttpResponse::Ok().json(recommendation)
}

async fn delete_recommendation(store: Store, id: web::Path<i64>) -> HttpResponse {
    let mut data = store.lock().unwrap();
    data.recommendations.retain(|r| r.id != *id);
    HttpResponse::Ok().finish()
}
