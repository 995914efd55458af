use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use entity::{
    notification::{NotificationPriority, NotificationType},
    notification_preference::DeliveryChannel,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::model::api::UserSummaryDto;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateNotificationDto {
    pub user_id: Uuid,
    pub triggered_by_user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub priority: Option<NotificationPriority>,
    pub data: Option<Value>,
    #[validate(length(max = 500))]
    pub action_url: Option<String>,
    #[validate(length(max = 100))]
    pub action_text: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
}

/// Same notification fanned out to several recipients.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct BulkNotificationDto {
    #[validate(length(min = 1, max = 1000))]
    pub user_ids: Vec<Uuid>,
    pub triggered_by_user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub priority: Option<NotificationPriority>,
    pub data: Option<Value>,
    #[validate(length(max = 500))]
    pub action_url: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateNotificationDto {
    pub mark_as_read: Option<bool>,
    pub mark_as_clicked: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct NotificationListQuery {
    pub unread_only: Option<bool>,
    pub category: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NotificationDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub triggered_by_user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_by_user: Option<UserSummaryDto>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub data: Option<Value>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub clicked_at: Option<DateTime<Utc>>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedNotificationsDto {
    pub notifications: Vec<NotificationDto>,
    pub total: u64,
    pub unread_count: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreatedCountDto {
    pub created_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NotificationStatsDto {
    pub total_notifications: u64,
    pub unread_notifications: u64,
    pub notifications_by_type: BTreeMap<String, u64>,
    pub recent_activity: bool,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct UpsertPreferenceDto {
    pub notification_type: NotificationType,
    pub delivery_channel: DeliveryChannel,
    pub is_enabled: Option<bool>,
    pub settings: Option<Value>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdatePreferenceDto {
    pub is_enabled: Option<bool>,
    pub settings: Option<Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PreferenceDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub delivery_channel: DeliveryChannel,
    pub is_enabled: bool,
    pub settings: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct WorkoutReminderDto {
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100))]
    pub workout_type: String,
    pub workout_id: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct AchievementNotificationDto {
    #[validate(length(min = 1, max = 100))]
    pub id: String,
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct SocialNotificationDto {
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
    #[validate(length(max = 500))]
    pub action_url: Option<String>,
    #[validate(length(max = 100))]
    pub action_text: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SocialNotificationQuery {
    pub triggered_by: Uuid,
}
