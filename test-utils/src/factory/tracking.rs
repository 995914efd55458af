//! Health log and reminder factories.

use chrono::{NaiveDate, Utc};
use entity::reminder::{ReminderFrequency, ReminderStatus, ReminderType};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Inserts a health log for `user_id` on `date` with the given calorie and step counts.
pub async fn create_health_log(
    db: &DatabaseConnection,
    user_id: Uuid,
    date: NaiveDate,
    calories: Option<i32>,
    steps: Option<i32>,
) -> Result<entity::health_log::Model, DbErr> {
    let now = Utc::now();
    entity::health_log::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        user_id: ActiveValue::Set(user_id),
        date: ActiveValue::Set(date),
        calories: ActiveValue::Set(calories),
        steps: ActiveValue::Set(steps),
        hydration_ml: ActiveValue::Set(None),
        sleep_hours: ActiveValue::Set(None),
        vitamin_summary: ActiveValue::Set(None),
        additional_metrics: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Inserts an active daily reminder with notifications enabled.
pub async fn create_reminder(
    db: &DatabaseConnection,
    user_id: Uuid,
    reminder_type: ReminderType,
    time: &str,
) -> Result<entity::reminder::Model, DbErr> {
    let now = Utc::now();
    entity::reminder::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        user_id: ActiveValue::Set(user_id),
        title: ActiveValue::Set(format!("Reminder at {}", time)),
        description: ActiveValue::Set(None),
        reminder_type: ActiveValue::Set(reminder_type),
        frequency: ActiveValue::Set(ReminderFrequency::Daily),
        time: ActiveValue::Set(time.to_string()),
        start_date: ActiveValue::Set(None),
        end_date: ActiveValue::Set(None),
        custom_schedule: ActiveValue::Set(None),
        status: ActiveValue::Set(ReminderStatus::Active),
        is_notification_enabled: ActiveValue::Set(true),
        metadata: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
