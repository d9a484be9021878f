use crate::handlers::{
    app::health_check,
    auth::login_handler,
    invoices::{
        create_invoice_handler, delete_invoice_handler, list_invoices_handler,
        update_invoice_handler,
    },
    metrics::metrics,
};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/login", post(login_handler))
        .route(
            "/dashboard/invoices",
            get(list_invoices_handler).post(create_invoice_handler),
        )
        .route(
            "/dashboard/invoices/:id",
            post(update_invoice_handler).delete(delete_invoice_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
