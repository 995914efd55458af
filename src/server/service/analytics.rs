use chrono::{NaiveDate, Utc};
use entity::analytics::PeriodType;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::analytics::SaveDashboardSettingsDto,
    server::{
        data::{analytics::AnalyticsRepository, dashboard_settings::DashboardSettingsRepository},
        error::AppError,
        model::analytics::{
            is_valid_period, window_start, Analytics, AnalyticsFilter, CreateAnalyticsParams,
            Dashboard, DashboardSettings, DashboardSettingsParams, UpdateAnalyticsParams,
        },
        service::user::ensure_self,
        util::pagination::{Page, PageRequest},
    },
};

const FORBIDDEN: &str = "You can only access your own analytics";

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores an analytics snapshot for the caller.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - `period_end` is before `period_start`
    pub async fn create(&self, params: CreateAnalyticsParams) -> Result<Analytics, AppError> {
        ensure_period(params.period_start, params.period_end)?;

        Ok(AnalyticsRepository::new(self.db).create(params).await?)
    }

    pub async fn find_by_user(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        filter: AnalyticsFilter,
        request: PageRequest,
    ) -> Result<Page<Analytics>, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        Ok(AnalyticsRepository::new(self.db)
            .find_by_user(user_id, &filter, request)
            .await?)
    }

    pub async fn get(&self, caller_id: Uuid, id: Uuid) -> Result<Analytics, AppError> {
        let analytics = AnalyticsRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Analytics"))?;
        ensure_self(caller_id, analytics.user_id, FORBIDDEN)?;

        Ok(analytics)
    }

    /// Updates a snapshot. The resulting period is checked against the stored bounds.
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateAnalyticsParams,
    ) -> Result<Analytics, AppError> {
        let existing = self.get(caller_id, id).await?;
        ensure_period(
            params.period_start.unwrap_or(existing.period_start),
            params.period_end.unwrap_or(existing.period_end),
        )?;

        Ok(AnalyticsRepository::new(self.db).update(id, params).await?)
    }

    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.get(caller_id, id).await?;
        AnalyticsRepository::new(self.db).delete(id).await?;

        Ok(())
    }

    /// Summarizes the rows whose period started within the last `period`.
    pub async fn dashboard(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        period: PeriodType,
    ) -> Result<Dashboard, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        let today = Utc::now().date_naive();
        let rows = AnalyticsRepository::new(self.db)
            .find_in_window(user_id, window_start(today, period), today)
            .await?;

        Ok(Dashboard::from_analytics(&rows))
    }

    /// Returns the user's dashboard settings, creating the defaults on first access.
    pub async fn settings(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
    ) -> Result<DashboardSettings, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        let txn = self.db.begin().await?;
        let repo = DashboardSettingsRepository::new(&txn);

        let settings = match repo.find_by_user(user_id).await? {
            Some(settings) => settings,
            None => {
                repo.create(user_id, DashboardSettingsParams::default())
                    .await?
            }
        };

        txn.commit().await?;

        Ok(settings)
    }

    /// Creates or updates the caller's settings with the provided fields.
    pub async fn save_settings(
        &self,
        caller_id: Uuid,
        dto: SaveDashboardSettingsDto,
    ) -> Result<DashboardSettings, AppError> {
        let txn = self.db.begin().await?;
        let repo = DashboardSettingsRepository::new(&txn);

        let settings = match repo.find_by_user(caller_id).await? {
            Some(existing) => {
                let id = existing.id;
                let params = DashboardSettingsParams::from_settings(existing).apply(dto);
                repo.update(id, params).await?
            }
            None => {
                repo.create(caller_id, DashboardSettingsParams::default().apply(dto))
                    .await?
            }
        };

        txn.commit().await?;

        Ok(settings)
    }
}

fn ensure_period(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if !is_valid_period(start, end) {
        return Err(AppError::BadRequest(
            "period_end must not be before period_start".to_string(),
        ));
    }
    Ok(())
}
