//! Authentication ports - the identity provider collaborator.

use uuid::Uuid;

/// Claims carried by a validated bearer token.
///
/// Identity is opaque: nothing beyond the user id is exercised by the
/// post service.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Token service trait for bearer credential operations.
pub trait TokenService: Send + Sync {
    /// Mint a bearer token for a user.
    fn generate_token(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Validate and decode a bearer token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
