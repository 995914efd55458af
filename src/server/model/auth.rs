//! Identity provider account model.

use serde_json::Value;

use crate::model::auth::ProviderUserDto;

/// Account returned by the identity provider for a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderUser {
    /// Provider subject id.
    pub id: String,
    pub email: Option<String>,
    /// Free-form profile data (`full_name`, `name`, `avatar_url`).
    pub user_metadata: Value,
}

impl ProviderUser {
    pub fn from_dto(dto: ProviderUserDto) -> Self {
        Self {
            id: dto.id,
            email: dto.email,
            user_metadata: dto.user_metadata,
        }
    }

    pub fn into_dto(self) -> ProviderUserDto {
        ProviderUserDto {
            id: self.id,
            email: self.email,
            user_metadata: self.user_metadata,
        }
    }

    fn metadata_str(&self, key: &str) -> Option<String> {
        self.user_metadata
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }

    /// Display name from `full_name`, then `name`, then the local part of the email.
    pub fn display_name(&self) -> Option<String> {
        self.metadata_str("full_name")
            .or_else(|| self.metadata_str("name"))
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.metadata_str("avatar_url")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider_user(metadata: Value) -> ProviderUser {
        ProviderUser {
            id: "sub-1".to_string(),
            email: Some("jane.doe@example.com".to_string()),
            user_metadata: metadata,
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        let user = provider_user(json!({"full_name": "Jane Doe", "name": "jane"}));
        assert_eq!(user.display_name().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let user = provider_user(json!({"full_name": "  "}));
        assert_eq!(user.display_name().as_deref(), Some("jane.doe"));
    }

    #[test]
    fn avatar_comes_from_metadata() {
        let user = provider_user(json!({"avatar_url": "https://img.example.com/a.png"}));
        assert_eq!(
            user.avatar_url().as_deref(),
            Some("https://img.example.com/a.png")
        );
    }
}
