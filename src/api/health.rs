use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Base URL of the collaborator services this instance talks to
    pub upstream: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "storefront-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: state.client.base_url().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unreachable_client;
    use actix_web::test::{call_and_read_body_json, init_service, TestRequest};
    use actix_web::App;

    #[actix_web::test]
    async fn test_health_reports_service() {
        let state = web::Data::new(AppState::new(unreachable_client(), 1, None));
        let app = init_service(
            App::new()
                .app_data(state)
                .route("/health", web::get().to(health_check)),
        )
        .await;

        let req = TestRequest::get().uri("/health").to_request();
        let health: HealthResponse = call_and_read_body_json(&app, req).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "storefront-web");
        assert_eq!(health.upstream, "http://127.0.0.1:9");
    }
}
