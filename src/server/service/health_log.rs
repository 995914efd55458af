use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::health_log::HealthLogRepository,
    error::AppError,
    model::health_log::{CreateHealthLogParams, HealthLog, HealthStats, UpdateHealthLogParams},
    service::user::ensure_self,
    util::pagination::{Page, PageRequest},
};

const FORBIDDEN: &str = "You can only access your own health logs";

pub struct HealthLogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HealthLogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records the caller's log for a day.
    ///
    /// # Returns
    /// - `Ok(HealthLog)` - Created log
    /// - `Err(AppError::Conflict)` - A log for that date already exists
    pub async fn create(&self, params: CreateHealthLogParams) -> Result<HealthLog, AppError> {
        let repo = HealthLogRepository::new(self.db);

        if repo
            .find_by_user_and_date(params.user_id, params.date)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A health log already exists for this date".to_string(),
            ));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn find_by_user(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<HealthLog>, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        Ok(HealthLogRepository::new(self.db)
            .find_by_user(user_id, request)
            .await?)
    }

    /// Aggregates a user's logs, optionally within a date window.
    pub async fn stats(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<HealthStats, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        let logs = HealthLogRepository::new(self.db)
            .find_in_range(user_id, start, end)
            .await?;

        Ok(HealthStats::from_logs(&logs, start, end))
    }

    /// Logs between two dates inclusive, oldest first.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - A bound is missing or `start` is after `end`
    pub async fn find_range(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<HealthLog>, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        let (Some(start), Some(end)) = (start, end) else {
            return Err(AppError::BadRequest(
                "start_date and end_date are required".to_string(),
            ));
        };
        if start > end {
            return Err(AppError::BadRequest(
                "start_date must not be after end_date".to_string(),
            ));
        }

        Ok(HealthLogRepository::new(self.db)
            .find_in_range(user_id, Some(start), Some(end))
            .await?)
    }

    pub async fn get(&self, caller_id: Uuid, id: Uuid) -> Result<HealthLog, AppError> {
        let log = HealthLogRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Health log"))?;
        ensure_self(caller_id, log.user_id, FORBIDDEN)?;

        Ok(log)
    }

    /// Updates a log, rejecting a move onto a date that already has one.
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateHealthLogParams,
    ) -> Result<HealthLog, AppError> {
        let log = self.get(caller_id, id).await?;
        let repo = HealthLogRepository::new(self.db);

        if let Some(date) = params.date.filter(|d| *d != log.date) {
            if repo.find_by_user_and_date(log.user_id, date).await?.is_some() {
                return Err(AppError::Conflict(
                    "A health log already exists for this date".to_string(),
                ));
            }
        }

        Ok(repo.update(id, params).await?)
    }

    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.get(caller_id, id).await?;
        HealthLogRepository::new(self.db).delete(id).await?;

        Ok(())
    }
}
