//! Credentials authentication action.

use crate::error::AppError;
use crate::services::metrics::SIGN_IN_TOTAL;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{instrument, warn};
use validator::Validate;

/// Provider name forwarded to the sign-in collaborator.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

/// Login form payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsPayload {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Closed set of authentication failure kinds. Matched exhaustively; a new
/// kind forces a decision about its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    CredentialsSignin,
    AccessDenied,
    CallbackRouteError,
}

/// Failure signaled by a sign-in collaborator. `Auth` kinds map to a
/// displayable message; `Fatal` failures propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("authentication failed: {0:?}")]
    Auth(AuthErrorKind),

    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

/// Sign-in seam. On success the collaborator has established the session;
/// the action returns nothing further.
#[async_trait]
pub trait SignIn: Send + Sync {
    async fn sign_in(
        &self,
        provider: &str,
        payload: &CredentialsPayload,
    ) -> Result<(), SignInError>;
}

/// Authentication action wired to its sign-in collaborator.
#[derive(Clone)]
pub struct AuthActions {
    signin: Arc<dyn SignIn>,
}

impl AuthActions {
    pub fn new(signin: Arc<dyn SignIn>) -> Self {
        Self { signin }
    }

    /// Forward the payload to the credentials provider. A known
    /// authentication failure maps to a displayable message (`Some`);
    /// success returns `None`; anything else propagates as an error.
    #[instrument(skip(self, payload), fields(email = %payload.email))]
    pub async fn authenticate(
        &self,
        payload: &CredentialsPayload,
    ) -> Result<Option<&'static str>, AppError> {
        match self.signin.sign_in(CREDENTIALS_PROVIDER, payload).await {
            Ok(()) => {
                SIGN_IN_TOTAL.with_label_values(&["ok"]).inc();
                Ok(None)
            }
            Err(SignInError::Auth(kind)) => {
                warn!(kind = ?kind, "Sign-in rejected");
                SIGN_IN_TOTAL.with_label_values(&["rejected"]).inc();
                Ok(Some(match kind {
                    AuthErrorKind::CredentialsSignin => "Invalid credentials.",
                    AuthErrorKind::AccessDenied | AuthErrorKind::CallbackRouteError => {
                        "Something went wrong."
                    }
                }))
            }
            Err(SignInError::Fatal(e)) => {
                SIGN_IN_TOTAL.with_label_values(&["error"]).inc();
                Err(AppError::InternalError(e))
            }
        }
    }
}
