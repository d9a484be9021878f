use crate::actions::auth::CredentialsPayload;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

/// POST /login. A mapped authentication failure comes back as a displayable
/// message; a fatal failure propagates as a 500.
pub async fn login_handler(
    State(state): State<AppState>,
    Form(payload): Form<CredentialsPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;

    match state.auth.authenticate(&payload).await? {
        None => Ok(Redirect::to("/dashboard").into_response()),
        Some(message) => Ok((StatusCode::UNPROCESSABLE_ENTITY, message).into_response()),
    }
}
