use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use uuid::Uuid;

use crate::server::model::analytics::{DashboardSettings, DashboardSettingsParams};

pub struct DashboardSettingsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DashboardSettingsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<DashboardSettings>, DbErr> {
        Ok(entity::prelude::DashboardSettings::find()
            .filter(entity::dashboard_settings::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .map(DashboardSettings::from_entity))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        params: DashboardSettingsParams,
    ) -> Result<DashboardSettings, DbErr> {
        let now = Utc::now();

        let entity = entity::dashboard_settings::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            widget_preferences: ActiveValue::Set(params.widget_preferences),
            chart_preferences: ActiveValue::Set(params.chart_preferences),
            notification_preferences: ActiveValue::Set(params.notification_preferences),
            theme: ActiveValue::Set(params.theme),
            units_preference: ActiveValue::Set(params.units_preference),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(DashboardSettings::from_entity(entity))
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: DashboardSettingsParams,
    ) -> Result<DashboardSettings, DbErr> {
        let mut active = entity::prelude::DashboardSettings::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Dashboard settings {} not found", id)))?
            .into_active_model();

        active.widget_preferences = ActiveValue::Set(params.widget_preferences);
        active.chart_preferences = ActiveValue::Set(params.chart_preferences);
        active.notification_preferences = ActiveValue::Set(params.notification_preferences);
        active.theme = ActiveValue::Set(params.theme);
        active.units_preference = ActiveValue::Set(params.units_preference);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(DashboardSettings::from_entity(active.update(self.db).await?))
    }
}
