//! User model backing the credentials provider.

use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Hex-encoded SHA-256 digest of the password.
    pub password_hash: String,
}
