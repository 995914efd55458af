use chrono::Utc;
use entity::reminder::ReminderStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde_json::Value;
use uuid::Uuid;

use crate::server::{
    model::reminder::{CreateReminderParams, Reminder, ReminderFilter, UpdateReminderParams},
    util::pagination::{Page, PageRequest},
};

pub struct ReminderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReminderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateReminderParams) -> Result<Reminder, DbErr> {
        let now = Utc::now();

        let entity = entity::reminder::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            reminder_type: ActiveValue::Set(params.reminder_type),
            frequency: ActiveValue::Set(params.frequency),
            time: ActiveValue::Set(params.time),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            custom_schedule: ActiveValue::Set(params.custom_schedule),
            status: ActiveValue::Set(params.status),
            is_notification_enabled: ActiveValue::Set(params.is_notification_enabled),
            metadata: ActiveValue::Set(params.metadata),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Reminder::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reminder>, DbErr> {
        Ok(entity::prelude::Reminder::find_by_id(id)
            .one(self.db)
            .await?
            .map(Reminder::from_entity))
    }

    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        filter: &ReminderFilter,
        request: PageRequest,
    ) -> Result<Page<Reminder>, DbErr> {
        let mut query = entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::UserId.eq(user_id));

        if let Some(status) = filter.status {
            query = query.filter(entity::reminder::Column::Status.eq(status));
        }
        if let Some(reminder_type) = filter.reminder_type {
            query = query.filter(entity::reminder::Column::ReminderType.eq(reminder_type));
        }

        let paginator = query
            .order_by_desc(entity::reminder::Column::CreatedAt)
            .order_by_asc(entity::reminder::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let reminders = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Reminder::from_entity)
            .collect();

        Ok(Page::new(reminders, total, request))
    }

    /// Active reminders with notifications enabled, earliest time of day first.
    pub async fn find_upcoming(&self, user_id: Uuid) -> Result<Vec<Reminder>, DbErr> {
        Ok(entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::UserId.eq(user_id))
            .filter(entity::reminder::Column::Status.eq(ReminderStatus::Active))
            .filter(entity::reminder::Column::IsNotificationEnabled.eq(true))
            .order_by_asc(entity::reminder::Column::Time)
            .order_by_asc(entity::reminder::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reminder::from_entity)
            .collect())
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Reminder>, DbErr> {
        Ok(entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(Reminder::from_entity)
            .collect())
    }

    pub async fn update(&self, id: Uuid, params: UpdateReminderParams) -> Result<Reminder, DbErr> {
        let mut active = self.load(id).await?.into_active_model();

        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(reminder_type) = params.reminder_type {
            active.reminder_type = ActiveValue::Set(reminder_type);
        }
        if let Some(frequency) = params.frequency {
            active.frequency = ActiveValue::Set(frequency);
        }
        if let Some(time) = params.time {
            active.time = ActiveValue::Set(time);
        }
        if let Some(start_date) = params.start_date {
            active.start_date = ActiveValue::Set(Some(start_date));
        }
        if let Some(end_date) = params.end_date {
            active.end_date = ActiveValue::Set(Some(end_date));
        }
        if let Some(custom_schedule) = params.custom_schedule {
            active.custom_schedule = ActiveValue::Set(Some(custom_schedule));
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status);
        }
        if let Some(enabled) = params.is_notification_enabled {
            active.is_notification_enabled = ActiveValue::Set(enabled);
        }
        if let Some(metadata) = params.metadata {
            active.metadata = ActiveValue::Set(Some(metadata));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Reminder::from_entity(active.update(self.db).await?))
    }

    pub async fn set_metadata(&self, id: Uuid, metadata: Value) -> Result<Reminder, DbErr> {
        let mut active = self.load(id).await?.into_active_model();
        active.metadata = ActiveValue::Set(Some(metadata));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Reminder::from_entity(active.update(self.db).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Reminder::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn load(&self, id: Uuid) -> Result<entity::reminder::Model, DbErr> {
        entity::prelude::Reminder::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Reminder {} not found", id)))
    }
}
