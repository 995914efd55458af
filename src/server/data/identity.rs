//! Identity provider boundary.
//!
//! The application never validates bearer tokens itself. It asks an external identity
//! provider for the account behind a token through the `IdentityProvider` trait. The
//! production implementation talks to Supabase Auth over HTTPS.

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::{
    model::auth::ProviderUserDto,
    server::{
        error::{auth::AuthError, config::ConfigError},
        model::auth::ProviderUser,
    },
};

/// Resolves bearer tokens to provider accounts.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Looks up the account a token was issued for.
    ///
    /// # Returns
    /// - `Ok(ProviderUser)` - Token is valid
    /// - `Err(AuthError::InvalidToken)` - Provider rejected the token
    /// - `Err(AuthError::ProviderUnavailable)` - Provider could not be reached
    async fn get_user(&self, token: &str) -> Result<ProviderUser, AuthError>;
}

/// Supabase Auth client calling `GET {SUPABASE_URL}/auth/v1/user`.
pub struct SupabaseIdentityProvider {
    client: reqwest::Client,
    user_endpoint: Url,
    api_key: String,
}

impl SupabaseIdentityProvider {
    /// Creates a provider for the given Supabase project URL.
    ///
    /// # Arguments
    /// - `client` - Shared HTTP client
    /// - `base_url` - Project URL, e.g. `https://abc.supabase.co`
    /// - `api_key` - Key sent in the `apikey` header
    ///
    /// # Returns
    /// - `Ok(SupabaseIdentityProvider)` - Provider ready for use
    /// - `Err(ConfigError::InvalidUrl)` - `base_url` is not a valid URL
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String) -> Result<Self, ConfigError> {
        let user_endpoint = Url::parse(&format!(
            "{}/auth/v1/user",
            base_url.trim_end_matches('/')
        ))?;

        Ok(Self {
            client,
            user_endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn get_user(&self, token: &str) -> Result<ProviderUser, AuthError> {
        let response = self
            .client
            .get(self.user_endpoint.clone())
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let user = response
                .json::<ProviderUserDto>()
                .await
                .map_err(|e| AuthError::ProviderUnavailable(e.to_string()))?;

            return Ok(ProviderUser::from_dto(user));
        }

        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND
            | StatusCode::UNPROCESSABLE_ENTITY => Err(AuthError::InvalidToken(status.to_string())),
            _ => Err(AuthError::ProviderUnavailable(format!(
                "Unexpected status {} from identity provider",
                status
            ))),
        }
    }
}
