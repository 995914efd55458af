//! Request body validation.
//!
//! `ValidatedJson` deserializes a JSON body and runs its `validator::Validate` rules
//! before the handler sees it. The free functions are custom field validators
//! referenced from `#[validate(custom(function = ...))]` attributes on request DTOs.

use std::borrow::Cow;

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::server::error::AppError;

/// JSON body extractor that rejects invalid payloads with 400 before the handler runs.
///
/// Malformed JSON becomes `AppError::BadRequest` carrying the deserializer message.
/// Field rule failures become `AppError::Validation` with one entry per failing field.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Accepts a 24-hour `HH:MM` time of day.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit);

    if well_formed {
        let hours = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        if hours < 24 && minutes < 60 {
            return Ok(());
        }
    }

    Err(invalid("time_format", "must be a time in HH:MM format"))
}

/// Accepts a JSON object with at least one key.
pub fn validate_non_empty_object(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Object(map) if !map.is_empty() => Ok(()),
        _ => Err(invalid("non_empty_object", "must be a non-empty object")),
    }
}

/// Accepts any JSON object, including an empty one.
pub fn validate_object(value: &Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(invalid("object", "must be an object"))
    }
}

/// Accepts role names made of ASCII letters, digits, `_` and `-`.
pub fn validate_role_name(value: &str) -> Result<(), ValidationError> {
    if value
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        Ok(())
    } else {
        Err(invalid(
            "role_name",
            "may only contain letters, numbers, underscores and hyphens",
        ))
    }
}

/// Accepts a challenge goal object carrying a numeric `target` and a string `unit`.
pub fn validate_goal(value: &Value) -> Result<(), ValidationError> {
    let Value::Object(map) = value else {
        return Err(invalid("goal", "must be an object with target and unit"));
    };

    if !map.get("target").is_some_and(Value::is_number) {
        return Err(invalid("goal_target", "must contain a numeric target"));
    }
    if !map.get("unit").is_some_and(Value::is_string) {
        return Err(invalid("goal_unit", "must contain a string unit"));
    }

    Ok(())
}

/// Accepts a list in which every entry is an absolute URL.
pub fn validate_url_list(urls: &[String]) -> Result<(), ValidationError> {
    if urls.iter().all(|u| url::Url::parse(u).is_ok()) {
        Ok(())
    } else {
        Err(invalid("url_list", "must contain only valid URLs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_of_day_bounds() {
        assert!(validate_time_of_day("00:00").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("12:60").is_err());
        assert!(validate_time_of_day("9:30").is_err());
        assert!(validate_time_of_day("09-30").is_err());
    }

    #[test]
    fn goal_requires_numeric_target_and_unit() {
        assert!(validate_goal(&json!({"target": 10000, "unit": "steps"})).is_ok());
        assert!(validate_goal(&json!({"target": "10000", "unit": "steps"})).is_err());
        assert!(validate_goal(&json!({"target": 10000})).is_err());
        assert!(validate_goal(&json!([1])).is_err());
    }

    #[test]
    fn non_empty_object() {
        assert!(validate_non_empty_object(&json!({"k": 1})).is_ok());
        assert!(validate_non_empty_object(&json!({})).is_err());
        assert!(validate_non_empty_object(&json!("text")).is_err());
    }

    #[test]
    fn role_name_charset() {
        assert!(validate_role_name("moderator").is_ok());
        assert!(validate_role_name("Coach_Level-2").is_ok());
        assert!(validate_role_name("super admin").is_err());
        assert!(validate_role_name("admin!").is_err());
        assert!(validate_role_name("trainér").is_err());
    }

    #[test]
    fn object_allows_empty_map() {
        assert!(validate_object(&json!({})).is_ok());
        assert!(validate_object(&json!({"posts": ["read"]})).is_ok());
        assert!(validate_object(&json!(["read"])).is_err());
    }

    #[test]
    fn url_list() {
        assert!(validate_url_list(&["https://cdn.example.com/a.png".to_string()]).is_ok());
        assert!(validate_url_list(&["not a url".to_string()]).is_err());
    }
}
