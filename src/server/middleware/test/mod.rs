use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use sea_orm::DbErr;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::identity::IdentityProvider,
    error::{auth::AuthError, AppError},
    middleware::auth::{bearer_token, AuthGuard},
    model::auth::ProviderUser,
};

mod bearer;
mod guard;

/// Identity provider that accepts a fixed set of tokens.
struct StaticIdentityProvider {
    accounts: HashMap<String, ProviderUser>,
}

impl StaticIdentityProvider {
    fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    fn with_account(mut self, token: &str, subject: &str, email: Option<&str>) -> Self {
        self.accounts.insert(
            token.to_string(),
            ProviderUser {
                id: subject.to_string(),
                email: email.map(str::to_string),
                user_metadata: json!({ "full_name": "Casey Runner" }),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn get_user(&self, token: &str) -> Result<ProviderUser, AuthError> {
        self.accounts
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }
}

fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}
