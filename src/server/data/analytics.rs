use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    model::analytics::{Analytics, AnalyticsFilter, CreateAnalyticsParams, UpdateAnalyticsParams},
    util::pagination::{Page, PageRequest},
};

pub struct AnalyticsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AnalyticsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateAnalyticsParams) -> Result<Analytics, DbErr> {
        let now = Utc::now();

        let entity = entity::analytics::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            analytics_type: ActiveValue::Set(params.analytics_type),
            period_type: ActiveValue::Set(params.period_type),
            period_start: ActiveValue::Set(params.period_start),
            period_end: ActiveValue::Set(params.period_end),
            metrics: ActiveValue::Set(params.metrics),
            insights: ActiveValue::Set(params.insights),
            score: ActiveValue::Set(params.score),
            goals_progress: ActiveValue::Set(params.goals_progress),
            comparisons: ActiveValue::Set(params.comparisons),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Analytics::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Analytics>, DbErr> {
        Ok(entity::prelude::Analytics::find_by_id(id)
            .one(self.db)
            .await?
            .map(Analytics::from_entity))
    }

    /// Lists a user's analytics, latest period first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        filter: &AnalyticsFilter,
        request: PageRequest,
    ) -> Result<Page<Analytics>, DbErr> {
        use entity::analytics::Column;

        let mut query = entity::prelude::Analytics::find().filter(Column::UserId.eq(user_id));

        if let Some(analytics_type) = filter.analytics_type {
            query = query.filter(Column::AnalyticsType.eq(analytics_type));
        }
        if let Some(period_type) = filter.period_type {
            query = query.filter(Column::PeriodType.eq(period_type));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(Column::PeriodStart.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(Column::PeriodStart.lte(end));
        }

        let paginator = query
            .order_by_desc(Column::PeriodStart)
            .order_by_asc(Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Analytics::from_entity)
            .collect();

        Ok(Page::new(rows, total, request))
    }

    /// Every row whose period starts within `[start, end]`, latest first.
    pub async fn find_in_window(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Analytics>, DbErr> {
        use entity::analytics::Column;

        Ok(entity::prelude::Analytics::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PeriodStart.between(start, end))
            .order_by_desc(Column::PeriodStart)
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Analytics::from_entity)
            .collect())
    }

    pub async fn update(&self, id: Uuid, params: UpdateAnalyticsParams) -> Result<Analytics, DbErr> {
        let mut active = entity::prelude::Analytics::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Analytics {} not found", id)))?
            .into_active_model();

        if let Some(analytics_type) = params.analytics_type {
            active.analytics_type = ActiveValue::Set(analytics_type);
        }
        if let Some(period_type) = params.period_type {
            active.period_type = ActiveValue::Set(period_type);
        }
        if let Some(period_start) = params.period_start {
            active.period_start = ActiveValue::Set(period_start);
        }
        if let Some(period_end) = params.period_end {
            active.period_end = ActiveValue::Set(period_end);
        }
        if let Some(metrics) = params.metrics {
            active.metrics = ActiveValue::Set(metrics);
        }
        if let Some(insights) = params.insights {
            active.insights = ActiveValue::Set(Some(insights));
        }
        if let Some(score) = params.score {
            active.score = ActiveValue::Set(Some(score));
        }
        if let Some(goals_progress) = params.goals_progress {
            active.goals_progress = ActiveValue::Set(Some(goals_progress));
        }
        if let Some(comparisons) = params.comparisons {
            active.comparisons = ActiveValue::Set(Some(comparisons));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Analytics::from_entity(active.update(self.db).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Analytics::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
