use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::user::UserDto;

/// Account as reported by the external identity provider.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProviderUserDto {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VerifyTokenDto {
    pub user: UserDto,
    pub provider_user: ProviderUserDto,
}

/// Event pushed by the identity provider's webhook.
#[derive(Deserialize, Clone, Debug)]
pub struct WebhookEventDto {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WebhookAckDto {
    pub success: bool,
    pub message: String,
}
