use serde::{Deserialize, Serialize};

/// Error body returned for every non-validation failure.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDto {
    pub error: String,
}

/// Error body returned when request validation fails.
#[derive(Serialize, Deserialize, Debug)]
pub struct ValidationErrorDto {
    pub error: String,
    /// Field-level messages formatted as `"field: message"`.
    pub errors: Vec<String>,
}

/// Plain acknowledgement body.
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageDto {
    pub message: String,
}

/// Result of a like toggle on a post or comment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LikeToggleDto {
    /// `"Post liked"`, `"Comment unliked"`, etc.
    pub message: String,
    pub liked: bool,
    pub likes_count: i32,
}

/// Count of rows touched by a bulk operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpdatedCountDto {
    pub updated_count: u64,
}

/// Compact author/participant projection embedded in other resources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummaryDto {
    pub id: uuid::Uuid,
    pub name: Option<String>,
    pub profile_image: Option<String>,
}

/// `?page=&limit=` query for list endpoints without filters.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct PageQueryDto {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
