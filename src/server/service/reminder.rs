use chrono::Utc;
use entity::reminder::ReminderStatus;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::reminder::ReminderRepository,
    error::AppError,
    model::reminder::{
        is_valid_schedule, snoozed_metadata, CreateReminderParams, Reminder, ReminderFilter,
        ReminderStats, UpdateReminderParams,
    },
    service::user::ensure_self,
    util::pagination::{Page, PageRequest},
};

const FORBIDDEN: &str = "You can only access your own reminders";

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a reminder for the caller.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - `end_date` is not after `start_date`
    pub async fn create(&self, params: CreateReminderParams) -> Result<Reminder, AppError> {
        ensure_schedule(params.start_date, params.end_date)?;

        Ok(ReminderRepository::new(self.db).create(params).await?)
    }

    pub async fn find_by_user(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        filter: ReminderFilter,
        request: PageRequest,
    ) -> Result<Page<Reminder>, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        Ok(ReminderRepository::new(self.db)
            .find_by_user(user_id, &filter, request)
            .await?)
    }

    pub async fn upcoming(&self, caller_id: Uuid, user_id: Uuid) -> Result<Vec<Reminder>, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        Ok(ReminderRepository::new(self.db).find_upcoming(user_id).await?)
    }

    pub async fn stats(&self, caller_id: Uuid, user_id: Uuid) -> Result<ReminderStats, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        let reminders = ReminderRepository::new(self.db)
            .find_all_by_user(user_id)
            .await?;

        Ok(ReminderStats::from_reminders(&reminders))
    }

    pub async fn get(&self, caller_id: Uuid, id: Uuid) -> Result<Reminder, AppError> {
        let reminder = ReminderRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reminder"))?;
        ensure_self(caller_id, reminder.user_id, FORBIDDEN)?;

        Ok(reminder)
    }

    /// Updates a reminder, validating the resulting schedule against stored dates.
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateReminderParams,
    ) -> Result<Reminder, AppError> {
        let reminder = self.get(caller_id, id).await?;
        ensure_schedule(
            params.start_date.or(reminder.start_date),
            params.end_date.or(reminder.end_date),
        )?;

        Ok(ReminderRepository::new(self.db).update(id, params).await?)
    }

    pub async fn update_status(
        &self,
        caller_id: Uuid,
        id: Uuid,
        status: ReminderStatus,
    ) -> Result<Reminder, AppError> {
        self.get(caller_id, id).await?;

        let params = UpdateReminderParams {
            status: Some(status),
            ..Default::default()
        };

        Ok(ReminderRepository::new(self.db).update(id, params).await?)
    }

    /// Postpones a reminder by `minutes`, recording the snooze in its metadata.
    pub async fn snooze(&self, caller_id: Uuid, id: Uuid, minutes: i64) -> Result<Reminder, AppError> {
        let reminder = self.get(caller_id, id).await?;
        let metadata = snoozed_metadata(reminder.metadata.as_ref(), Utc::now(), minutes);

        Ok(ReminderRepository::new(self.db)
            .set_metadata(id, metadata)
            .await?)
    }

    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.get(caller_id, id).await?;
        ReminderRepository::new(self.db).delete(id).await?;

        Ok(())
    }
}

fn ensure_schedule(
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> Result<(), AppError> {
    if !is_valid_schedule(start, end) {
        return Err(AppError::Conflict(
            "End date must be after start date".to_string(),
        ));
    }
    Ok(())
}
