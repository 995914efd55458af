//! Caller resolution and identity provider webhook handling.

use entity::user::AuthSource;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    data::{identity::IdentityProvider, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        auth::ProviderUser,
        user::{CreateUserParams, UpdateUserParams, User},
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    provider: &'a dyn IdentityProvider,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, provider: &'a dyn IdentityProvider) -> Self {
        Self { db, provider }
    }

    /// Resolves a bearer token to an active local user.
    ///
    /// # Arguments
    /// - `token` - Raw bearer token without the `Bearer ` prefix
    ///
    /// # Returns
    /// - `Ok(User)` - Local user linked to the token's provider account
    /// - `Err(AppError::AuthErr)` - Token rejected, provider down or user inactive
    pub async fn resolve_caller_from_token(&self, token: &str) -> Result<User, AppError> {
        let (user, _) = self.verify_token(token).await?;
        Ok(user)
    }

    /// Resolves a bearer token and also returns the provider's view of the account.
    pub async fn verify_token(&self, token: &str) -> Result<(User, ProviderUser), AppError> {
        let provider_user = self.provider.get_user(token).await?;
        let user = self.find_or_create_user(&provider_user).await?;

        if !user.is_active {
            return Err(AuthError::InactiveUser(user.id).into());
        }

        Ok((user, provider_user))
    }

    /// Finds the local user for a provider account, linking or creating as needed.
    ///
    /// Lookup order is provider subject id, then email. An account found by email is
    /// linked to the provider subject. When neither matches a new user is created from
    /// the provider profile.
    ///
    /// # Returns
    /// - `Ok(User)` - Existing, newly linked, or newly created user
    /// - `Err(AppError::AuthErr)` - Provider account has no email to create a user from
    pub async fn find_or_create_user(&self, provider_user: &ProviderUser) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if let Some(user) = repo.find_by_supabase_id(&provider_user.id).await? {
            return Ok(user);
        }

        let Some(email) = provider_user.email.as_deref() else {
            return Err(AuthError::InvalidToken(
                "Provider account has no email address".to_string(),
            )
            .into());
        };

        if let Some(user) = repo.find_by_email(email).await? {
            tracing::info!("Linking user {} to provider account {}", user.id, provider_user.id);
            return Ok(repo.link_supabase(user.id, &provider_user.id).await?);
        }

        let user = repo
            .create(CreateUserParams {
                email: email.to_lowercase(),
                name: provider_user.display_name(),
                bio: None,
                profile_image: provider_user.avatar_url(),
                cover_image: None,
                fitness_goal: None,
                interests: Vec::new(),
                supabase_id: Some(provider_user.id.clone()),
                auth_source: AuthSource::Supabase,
            })
            .await?;

        tracing::info!("Created user {} for provider account {}", user.id, provider_user.id);

        Ok(user)
    }

    /// Applies an identity provider webhook event.
    ///
    /// # Arguments
    /// - `event` - Event name such as `user.created`
    /// - `data` - Provider account payload
    ///
    /// # Returns
    /// - `Ok(String)` - Human readable outcome
    /// - `Err(AppError)` - Payload could not be applied
    pub async fn handle_webhook_event(&self, event: &str, data: Value) -> Result<String, AppError> {
        match event {
            "user.created" => {
                let provider_user = parse_provider_user(data)?;
                let user = self.find_or_create_user(&provider_user).await?;
                Ok(format!("User {} synchronized", user.id))
            }
            "user.updated" => {
                let provider_user = parse_provider_user(data)?;
                let repo = UserRepository::new(self.db);

                let Some(user) = repo.find_by_supabase_id(&provider_user.id).await? else {
                    let user = self.find_or_create_user(&provider_user).await?;
                    return Ok(format!("User {} synchronized", user.id));
                };

                let params = UpdateUserParams {
                    email: provider_user.email.as_deref().map(str::to_lowercase),
                    name: provider_user.display_name(),
                    profile_image: provider_user.avatar_url(),
                    ..Default::default()
                };
                repo.update(user.id, params).await?;

                Ok(format!("User {} updated", user.id))
            }
            "user.deleted" => {
                let provider_user = parse_provider_user(data)?;
                let repo = UserRepository::new(self.db);

                match repo.find_by_supabase_id(&provider_user.id).await? {
                    Some(user) => {
                        repo.set_active(user.id, false).await?;
                        Ok(format!("User {} deactivated", user.id))
                    }
                    None => Ok("No local user for deleted account".to_string()),
                }
            }
            other => {
                tracing::info!("Ignoring unhandled identity webhook event {}", other);
                Ok(format!("Event {} ignored", other))
            }
        }
    }
}

fn parse_provider_user(data: Value) -> Result<ProviderUser, AppError> {
    serde_json::from_value(data)
        .map(ProviderUser::from_dto)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {}", e)))
}
