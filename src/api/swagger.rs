use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Web - Operational API",
        version = "1.0.0",
        description = "Operational endpoints of the storefront web client.\n\nThe storefront and admin pages are server-rendered HTML and are not described here.\n\n**Features:**\n- Health check with upstream service address\n- Prometheus request and error counters",
    ),
    paths(
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check and request metrics for monitoring service status."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_operational_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/metrics"));
        assert_eq!(doc.paths.paths.len(), 2);
    }
}
