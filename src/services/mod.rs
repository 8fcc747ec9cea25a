pub mod http;
pub mod order_service;
pub mod product_service;
pub mod recommendation_service;
pub mod user_service;

pub use http::ServiceClient;
