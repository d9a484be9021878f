use crate::actions::invoice::{InvoiceFormPayload, INVOICES_PATH};
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use uuid::Uuid;

/// POST /dashboard/invoices
pub async fn create_invoice_handler(
    State(state): State<AppState>,
    Form(payload): Form<InvoiceFormPayload>,
) -> Response {
    match state.invoices.create_invoice(&payload).await {
        Ok(nav) => Redirect::to(&nav.target).into_response(),
        Err(form_state) => (StatusCode::UNPROCESSABLE_ENTITY, Json(form_state)).into_response(),
    }
}

/// POST /dashboard/invoices/{id}
pub async fn update_invoice_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(payload): Form<InvoiceFormPayload>,
) -> Response {
    match state.invoices.update_invoice(id, &payload).await {
        Ok(nav) => Redirect::to(&nav.target).into_response(),
        Err(form_state) => (StatusCode::UNPROCESSABLE_ENTITY, Json(form_state)).into_response(),
    }
}

/// DELETE /dashboard/invoices/{id} - no redirect; the caller stays on the
/// list route.
pub async fn delete_invoice_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    let form_state = state.invoices.delete_invoice(id).await;
    (StatusCode::UNPROCESSABLE_ENTITY, Json(form_state)).into_response()
}

/// GET /dashboard/invoices - served from the view cache when a rendering is
/// present, re-rendered from the store otherwise.
pub async fn list_invoices_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    if let Some(body) = state.views.read(INVOICES_PATH).await {
        return Ok(json_body(body));
    }

    let invoices = state.store.list_invoices(50).await?;
    let body = serde_json::to_string(&invoices)
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
    state.views.store(INVOICES_PATH, body.clone()).await;

    Ok(json_body(body))
}

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
