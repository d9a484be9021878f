use axum::response::IntoResponse;

/// GET /metrics - Prometheus text exposition.
pub async fn metrics() -> impl IntoResponse {
    crate::services::metrics::get_metrics()
}
