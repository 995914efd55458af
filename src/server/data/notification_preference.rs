use chrono::Utc;
use entity::{notification::NotificationType, notification_preference::DeliveryChannel};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use serde_json::Value;
use uuid::Uuid;

use crate::server::model::notification::Preference;

pub struct NotificationPreferenceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationPreferenceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        delivery_channel: DeliveryChannel,
    ) -> Result<Option<Preference>, DbErr> {
        use entity::notification_preference::Column;

        Ok(entity::prelude::NotificationPreference::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::NotificationType.eq(notification_type))
            .filter(Column::DeliveryChannel.eq(delivery_channel))
            .one(self.db)
            .await?
            .map(Preference::from_entity))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        delivery_channel: DeliveryChannel,
        is_enabled: bool,
        settings: Option<Value>,
    ) -> Result<Preference, DbErr> {
        let now = Utc::now();

        let entity = entity::notification_preference::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            notification_type: ActiveValue::Set(notification_type),
            delivery_channel: ActiveValue::Set(delivery_channel),
            is_enabled: ActiveValue::Set(is_enabled),
            settings: ActiveValue::Set(settings),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Preference::from_entity(entity))
    }

    /// Updates the switch and, when given, replaces the settings.
    pub async fn update(
        &self,
        id: Uuid,
        is_enabled: Option<bool>,
        settings: Option<Value>,
    ) -> Result<Preference, DbErr> {
        let mut active = entity::prelude::NotificationPreference::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Preference {} not found", id)))?
            .into_active_model();

        if let Some(is_enabled) = is_enabled {
            active.is_enabled = ActiveValue::Set(is_enabled);
        }
        if let Some(settings) = settings {
            active.settings = ActiveValue::Set(Some(settings));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Preference::from_entity(active.update(self.db).await?))
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Preference>, DbErr> {
        use entity::notification_preference::Column;

        Ok(entity::prelude::NotificationPreference::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::NotificationType)
            .order_by_asc(Column::DeliveryChannel)
            .all(self.db)
            .await?
            .into_iter()
            .map(Preference::from_entity)
            .collect())
    }
}
