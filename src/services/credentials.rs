//! Credentials sign-in backed by the users table.

use crate::actions::auth::{AuthErrorKind, CredentialsPayload, SignIn, SignInError};
use crate::services::database::Database;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::instrument;

/// Looks a user up by email and compares password digests in constant time.
/// Unknown user and digest mismatch are indistinguishable to the caller.
#[derive(Clone)]
pub struct CredentialsProvider {
    db: Database,
}

impl CredentialsProvider {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[async_trait]
impl SignIn for CredentialsProvider {
    #[instrument(skip(self, payload), fields(provider = provider))]
    async fn sign_in(
        &self,
        provider: &str,
        payload: &CredentialsPayload,
    ) -> Result<(), SignInError> {
        // A store failure here is not an authentication failure; it
        // propagates instead of mapping to a message.
        let user = self
            .db
            .find_user_by_email(&payload.email)
            .await
            .map_err(|e| SignInError::Fatal(anyhow::Error::new(e)))?;

        let Some(user) = user else {
            return Err(SignInError::Auth(AuthErrorKind::CredentialsSignin));
        };

        let candidate = password_digest(&payload.password);
        let matches: bool = candidate
            .as_bytes()
            .ct_eq(user.password_hash.as_bytes())
            .into();
        if !matches {
            return Err(SignInError::Auth(AuthErrorKind::CredentialsSignin));
        }

        Ok(())
    }
}
