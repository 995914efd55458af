//! Notification factory.

use chrono::{DateTime, Utc};
use entity::notification::{NotificationPriority, NotificationType};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating notifications.
///
/// Defaults to an unread, delivered, medium priority system update.
pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Uuid,
    notification_type: NotificationType,
    category: Option<String>,
    read_at: Option<DateTime<Utc>>,
    scheduled_for: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> NotificationFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: Uuid) -> Self {
        Self {
            db,
            user_id,
            notification_type: NotificationType::SystemUpdate,
            category: None,
            read_at: None,
            scheduled_for: None,
            created_at: Utc::now(),
        }
    }

    pub fn notification_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = notification_type;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn read(mut self) -> Self {
        self.read_at = Some(Utc::now());
        self
    }

    /// Schedules delivery in the future or past. The row stays undelivered until then.
    pub fn scheduled_for(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_for = Some(at);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        let delivered_at = match self.scheduled_for {
            Some(_) => None,
            None => Some(self.created_at),
        };

        entity::notification::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(self.user_id),
            triggered_by_user_id: ActiveValue::Set(None),
            title: ActiveValue::Set("Heads up".to_string()),
            message: ActiveValue::Set("Something happened".to_string()),
            notification_type: ActiveValue::Set(self.notification_type),
            priority: ActiveValue::Set(NotificationPriority::Medium),
            data: ActiveValue::Set(None),
            action_url: ActiveValue::Set(None),
            action_text: ActiveValue::Set(None),
            image_url: ActiveValue::Set(None),
            category: ActiveValue::Set(self.category),
            read_at: ActiveValue::Set(self.read_at),
            delivered_at: ActiveValue::Set(delivered_at),
            clicked_at: ActiveValue::Set(None),
            scheduled_for: ActiveValue::Set(self.scheduled_for),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_notification(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<entity::notification::Model, DbErr> {
    NotificationFactory::new(db, user_id).build().await
}
