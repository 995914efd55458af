use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization` header was sent on a protected endpoint.
    #[error("Missing authorization header")]
    MissingToken,

    /// `Authorization` header is present but is not `Bearer <token>`.
    #[error("Malformed authorization header")]
    MalformedHeader,

    /// Identity provider rejected the token.
    ///
    /// # Fields
    /// - Reason reported by the provider, logged but not returned to the client
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    /// Token is valid but the resolved local account has been deactivated.
    #[error("User account {0} is inactive")]
    InactiveUser(uuid::Uuid),

    /// Identity provider could not be reached or returned an unexpected response.
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Token problems map to 401 Unauthorized with a generic message so clients cannot
/// distinguish an unknown token from an expired one. Provider transport failures map
/// to 502 Bad Gateway. Every rejection is logged at warn level.
///
/// # Returns
/// - 401 Unauthorized - Missing, malformed, rejected token or inactive user
/// - 502 Bad Gateway - Identity provider unreachable
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!("Authentication rejected: {}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            Self::MalformedHeader => (StatusCode::UNAUTHORIZED, "Invalid authorization header"),
            Self::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            Self::InactiveUser(_) => (StatusCode::UNAUTHORIZED, "User account is inactive"),
            Self::ProviderUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, "Authentication service unavailable")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
