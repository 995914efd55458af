use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::auth::{VerifyTokenDto, WebhookAckDto, WebhookEventDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::bearer_token,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Verify a bearer token and return the resolved local user.
///
/// Creates or links the local account on first use.
///
/// # Returns
/// - `200 OK` - `{user, provider_user}`
/// - `401 Unauthorized` - Token missing or rejected
/// - `502 Bad Gateway` - Identity provider unreachable
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let Some(token) = bearer_token(&headers)? else {
        return Err(AuthError::MissingToken.into());
    };

    let (user, provider_user) = AuthService::new(&state.db, state.identity.as_ref())
        .verify_token(token)
        .await?;

    Ok((
        StatusCode::OK,
        Json(VerifyTokenDto {
            user: user.into_dto(),
            provider_user: provider_user.into_dto(),
        }),
    ))
}

/// Receive account lifecycle events from the identity provider.
///
/// Always acknowledges with 200 so the provider does not retry, even when the body is
/// unreadable or the event cannot be applied. Failures are logged.
pub async fn supabase_webhook(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let message = match serde_json::from_slice::<WebhookEventDto>(&body) {
        Ok(payload) => {
            let service = AuthService::new(&state.db, state.identity.as_ref());

            match service.handle_webhook_event(&payload.event, payload.data).await {
                Ok(message) => message,
                Err(err) => {
                    tracing::error!("Failed to handle identity webhook {}: {}", payload.event, err);
                    "Webhook received".to_string()
                }
            }
        }
        Err(err) => {
            tracing::error!("Failed to parse identity webhook body: {}", err);
            "Webhook received".to_string()
        }
    };

    (
        StatusCode::OK,
        Json(WebhookAckDto {
            success: true,
            message,
        }),
    )
}
