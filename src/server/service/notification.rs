use chrono::Utc;
use entity::{notification::NotificationType, notification_preference::DeliveryChannel};
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::notification::{UpdateNotificationDto, UpdatePreferenceDto, UpsertPreferenceDto},
    server::{
        data::{
            notification::NotificationRepository,
            notification_preference::NotificationPreferenceRepository, user::UserRepository,
        },
        error::AppError,
        model::notification::{
            read_state, CreateNotificationParams, Notification, NotificationFilter,
            NotificationStats, Preference,
        },
        service::user::{ensure_self, UserService},
        util::pagination::{Page, PageRequest},
    },
};

const FORBIDDEN: &str = "You can only access your own notifications";

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a notification. Unscheduled notifications are delivered immediately.
    ///
    /// # Returns
    /// - `Ok(Notification)` - Created notification
    /// - `Err(AppError::NotFound)` - Recipient or triggering user does not exist
    pub async fn create(&self, params: CreateNotificationParams) -> Result<Notification, AppError> {
        let users = UserService::new(self.db);
        users.get_by_id(params.user_id).await?;
        if let Some(triggered_by) = params.triggered_by_user_id {
            users.get_by_id(triggered_by).await?;
        }

        Ok(NotificationRepository::new(self.db)
            .create(params, Utc::now())
            .await?)
    }

    /// Creates the same notification for several recipients in one transaction.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications created
    /// - `Err(AppError::NotFound)` - Any recipient or the triggering user does not exist
    pub async fn create_bulk(&self, params: Vec<CreateNotificationParams>) -> Result<u64, AppError> {
        let mut user_ids: Vec<Uuid> = params.iter().map(|p| p.user_id).collect();
        user_ids.extend(params.iter().filter_map(|p| p.triggered_by_user_id));
        user_ids.sort();
        user_ids.dedup();

        let found = UserRepository::new(self.db)
            .find_summaries(&user_ids)
            .await?;
        if let Some(missing) = user_ids.iter().find(|id| !found.contains_key(id)) {
            return Err(AppError::NotFound(format!("User {} not found", missing)));
        }

        let txn = self.db.begin().await?;
        let created = NotificationRepository::new(&txn)
            .create_many(params, Utc::now())
            .await?;
        txn.commit().await?;

        tracing::debug!(created, "Bulk notifications created");

        Ok(created)
    }

    /// Lists a user's notifications after delivering any that are due.
    ///
    /// # Returns
    /// - `Ok((Page<Notification>, u64))` - Page plus the user's unread count
    pub async fn find_by_user(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        filter: NotificationFilter,
        request: PageRequest,
    ) -> Result<(Page<Notification>, u64), AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        let repo = NotificationRepository::new(self.db);
        let delivered = repo.deliver_due(Utc::now()).await?;
        if delivered > 0 {
            tracing::debug!(delivered, "Delivered scheduled notifications");
        }

        let page = repo.find_by_user(user_id, &filter, request).await?;
        let unread = repo.count_unread(user_id).await?;

        Ok((page, unread))
    }

    /// Gets a notification addressed to the caller.
    pub async fn get(&self, caller_id: Uuid, id: Uuid) -> Result<Notification, AppError> {
        let notification = NotificationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification"))?;
        ensure_self(caller_id, notification.user_id, FORBIDDEN)?;

        Ok(notification)
    }

    /// Applies read, click and visibility changes. Clicking also marks as read.
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        update: UpdateNotificationDto,
    ) -> Result<Notification, AppError> {
        let notification = self.get(caller_id, id).await?;
        let (read_at, clicked_at) = read_state(
            notification.read_at,
            notification.clicked_at,
            &update,
            Utc::now(),
        );

        Ok(NotificationRepository::new(self.db)
            .update(id, read_at, clicked_at, update.is_active)
            .await?)
    }

    pub async fn mark_as_read(&self, caller_id: Uuid, id: Uuid) -> Result<Notification, AppError> {
        self.update(
            caller_id,
            id,
            UpdateNotificationDto {
                mark_as_read: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn mark_all_as_read(&self, caller_id: Uuid, user_id: Uuid) -> Result<u64, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id, Utc::now())
            .await?)
    }

    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.get(caller_id, id).await?;
        NotificationRepository::new(self.db).delete(id).await?;

        Ok(())
    }

    /// Creates or updates the caller's preference for a type and channel.
    pub async fn upsert_preference(
        &self,
        caller_id: Uuid,
        dto: UpsertPreferenceDto,
    ) -> Result<Preference, AppError> {
        self.save_preference(
            caller_id,
            dto.notification_type,
            dto.delivery_channel,
            UpdatePreferenceDto {
                is_enabled: dto.is_enabled,
                settings: dto.settings,
            },
        )
        .await
    }

    pub async fn preferences(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Preference>, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        Ok(NotificationPreferenceRepository::new(self.db)
            .find_by_user(user_id)
            .await?)
    }

    /// Updates one preference, creating it enabled by default when it does not exist yet.
    pub async fn update_preference(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        notification_type: NotificationType,
        delivery_channel: DeliveryChannel,
        update: UpdatePreferenceDto,
    ) -> Result<Preference, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        self.save_preference(user_id, notification_type, delivery_channel, update)
            .await
    }

    pub async fn stats(&self, caller_id: Uuid, user_id: Uuid) -> Result<NotificationStats, AppError> {
        ensure_self(caller_id, user_id, FORBIDDEN)?;

        let notifications = NotificationRepository::new(self.db)
            .find_active_by_user(user_id)
            .await?;

        Ok(NotificationStats::from_notifications(
            &notifications,
            Utc::now(),
        ))
    }

    async fn save_preference(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        delivery_channel: DeliveryChannel,
        update: UpdatePreferenceDto,
    ) -> Result<Preference, AppError> {
        let txn = self.db.begin().await?;
        let repo = NotificationPreferenceRepository::new(&txn);

        let preference = match repo
            .find(user_id, notification_type, delivery_channel)
            .await?
        {
            Some(existing) => {
                repo.update(existing.id, update.is_enabled, update.settings)
                    .await?
            }
            None => {
                repo.create(
                    user_id,
                    notification_type,
                    delivery_channel,
                    update.is_enabled.unwrap_or(true),
                    update.settings,
                )
                .await?
            }
        };

        txn.commit().await?;

        Ok(preference)
    }
}
