use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use entity::reminder::{ReminderFrequency, ReminderStatus, ReminderType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::server::util::validation::validate_time_of_day;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateReminderDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub frequency: ReminderFrequency,
    #[validate(custom(function = "validate_time_of_day"))]
    pub time: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub custom_schedule: Option<Value>,
    pub status: Option<ReminderStatus>,
    pub is_notification_enabled: Option<bool>,
    pub metadata: Option<Value>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateReminderDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: Option<ReminderType>,
    pub frequency: Option<ReminderFrequency>,
    #[validate(custom(function = "validate_time_of_day"))]
    pub time: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub custom_schedule: Option<Value>,
    pub status: Option<ReminderStatus>,
    pub is_notification_enabled: Option<bool>,
    pub metadata: Option<Value>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct UpdateReminderStatusDto {
    pub status: ReminderStatus,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct SnoozeReminderDto {
    #[validate(range(min = 1, max = 1440))]
    pub minutes: i64,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ReminderListQuery {
    pub status: Option<ReminderStatus>,
    #[serde(rename = "type")]
    pub reminder_type: Option<ReminderType>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReminderDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub frequency: ReminderFrequency,
    pub time: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub custom_schedule: Option<Value>,
    pub status: ReminderStatus,
    pub is_notification_enabled: bool,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedRemindersDto {
    pub reminders: Vec<ReminderDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReminderStatsDto {
    pub total_reminders: u64,
    pub active_reminders: u64,
    pub completed_reminders: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_frequency: BTreeMap<String, u64>,
}
