use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    model::health_log::{CreateHealthLogParams, HealthLog, UpdateHealthLogParams},
    util::pagination::{Page, PageRequest},
};

pub struct HealthLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HealthLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a daily log.
    ///
    /// # Returns
    /// - `Err(DbErr)` - Includes a unique violation when the user already logged that date
    pub async fn create(&self, params: CreateHealthLogParams) -> Result<HealthLog, DbErr> {
        let now = Utc::now();

        let entity = entity::health_log::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            date: ActiveValue::Set(params.date),
            calories: ActiveValue::Set(params.calories),
            steps: ActiveValue::Set(params.steps),
            hydration_ml: ActiveValue::Set(params.hydration_ml),
            sleep_hours: ActiveValue::Set(params.sleep_hours),
            vitamin_summary: ActiveValue::Set(params.vitamin_summary),
            additional_metrics: ActiveValue::Set(params.additional_metrics),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(HealthLog::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<HealthLog>, DbErr> {
        Ok(entity::prelude::HealthLog::find_by_id(id)
            .one(self.db)
            .await?
            .map(HealthLog::from_entity))
    }

    pub async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<HealthLog>, DbErr> {
        Ok(entity::prelude::HealthLog::find()
            .filter(entity::health_log::Column::UserId.eq(user_id))
            .filter(entity::health_log::Column::Date.eq(date))
            .one(self.db)
            .await?
            .map(HealthLog::from_entity))
    }

    /// Lists a user's logs, most recent date first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<HealthLog>, DbErr> {
        let paginator = entity::prelude::HealthLog::find()
            .filter(entity::health_log::Column::UserId.eq(user_id))
            .order_by_desc(entity::health_log::Column::Date)
            .order_by_asc(entity::health_log::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let logs = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(HealthLog::from_entity)
            .collect();

        Ok(Page::new(logs, total, request))
    }

    /// All of a user's logs within the optional inclusive bounds, oldest first.
    pub async fn find_in_range(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<HealthLog>, DbErr> {
        let mut query = entity::prelude::HealthLog::find()
            .filter(entity::health_log::Column::UserId.eq(user_id));

        if let Some(start) = start {
            query = query.filter(entity::health_log::Column::Date.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(entity::health_log::Column::Date.lte(end));
        }

        Ok(query
            .order_by_asc(entity::health_log::Column::Date)
            .all(self.db)
            .await?
            .into_iter()
            .map(HealthLog::from_entity)
            .collect())
    }

    pub async fn update(&self, id: Uuid, params: UpdateHealthLogParams) -> Result<HealthLog, DbErr> {
        let mut active = entity::prelude::HealthLog::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Health log {} not found", id)))?
            .into_active_model();

        if let Some(date) = params.date {
            active.date = ActiveValue::Set(date);
        }
        if let Some(calories) = params.calories {
            active.calories = ActiveValue::Set(Some(calories));
        }
        if let Some(steps) = params.steps {
            active.steps = ActiveValue::Set(Some(steps));
        }
        if let Some(hydration_ml) = params.hydration_ml {
            active.hydration_ml = ActiveValue::Set(Some(hydration_ml));
        }
        if let Some(sleep_hours) = params.sleep_hours {
            active.sleep_hours = ActiveValue::Set(Some(sleep_hours));
        }
        if let Some(vitamin_summary) = params.vitamin_summary {
            active.vitamin_summary = ActiveValue::Set(Some(vitamin_summary));
        }
        if let Some(additional_metrics) = params.additional_metrics {
            active.additional_metrics = ActiveValue::Set(Some(additional_metrics));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(HealthLog::from_entity(active.update(self.db).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::HealthLog::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
