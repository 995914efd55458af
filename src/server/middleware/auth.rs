use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::identity::IdentityProvider,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::auth::AuthService,
};

/// Resolves the calling user from the `Authorization: Bearer <token>` header.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    identity: &'a dyn IdentityProvider,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, identity: &'a dyn IdentityProvider) -> Self {
        Self { db, identity }
    }

    /// Requires an authenticated, active caller.
    ///
    /// # Returns
    /// - `Ok(User)` - Resolved caller
    /// - `Err(AppError::AuthErr)` - Header missing or malformed, or token rejected
    pub async fn require(&self, headers: &HeaderMap) -> Result<User, AppError> {
        let Some(token) = bearer_token(headers)? else {
            return Err(AuthError::MissingToken.into());
        };

        AuthService::new(self.db, self.identity)
            .resolve_caller_from_token(token)
            .await
    }

    /// Resolves the caller when a header is present.
    ///
    /// An absent header yields `None`. A header that is present but invalid is still
    /// rejected so clients learn their token has expired.
    pub async fn optional(&self, headers: &HeaderMap) -> Result<Option<User>, AppError> {
        let Some(token) = bearer_token(headers)? else {
            return Ok(None);
        };

        let user = AuthService::new(self.db, self.identity)
            .resolve_caller_from_token(token)
            .await?;

        Ok(Some(user))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// # Returns
/// - `Ok(Some(token))` - Well-formed bearer header
/// - `Ok(None)` - No `Authorization` header
/// - `Err(AuthError::MalformedHeader)` - Header present but not a non-empty bearer token
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(Some(token.trim()))
}
