use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::user::UserRepository,
    model::notification::{CreateNotificationParams, Notification, NotificationFilter},
    util::pagination::{Page, PageRequest},
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateNotificationParams,
        now: DateTime<Utc>,
    ) -> Result<Notification, DbErr> {
        let entity = active_model(params, now).insert(self.db).await?;

        Ok(self.with_triggering_users(vec![entity]).await?.remove(0))
    }

    /// Inserts several notifications at once and returns how many were written.
    pub async fn create_many(
        &self,
        params: Vec<CreateNotificationParams>,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        if params.is_empty() {
            return Ok(0);
        }

        let models = params.into_iter().map(|p| active_model(p, now));

        entity::prelude::Notification::insert_many(models)
            .exec_without_returning(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DbErr> {
        let Some(entity) = entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.with_triggering_users(vec![entity]).await?.pop())
    }

    /// Marks every active notification whose scheduled time has passed as delivered.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications delivered
    pub async fn deliver_due(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        use entity::notification::Column;

        let result = entity::prelude::Notification::update_many()
            .col_expr(Column::DeliveredAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::ScheduledFor.lte(now))
            .filter(Column::DeliveredAt.is_null())
            .filter(Column::IsActive.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Lists a user's delivered, active notifications, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        filter: &NotificationFilter,
        request: PageRequest,
    ) -> Result<Page<Notification>, DbErr> {
        use entity::notification::Column;

        let mut query = entity::prelude::Notification::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::DeliveredAt.is_not_null());

        if filter.unread_only {
            query = query.filter(Column::ReadAt.is_null());
        }
        if let Some(category) = filter.category.as_deref() {
            query = query.filter(Column::Category.eq(category));
        }

        let paginator = query
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        Ok(Page::new(
            self.with_triggering_users(entities).await?,
            total,
            request,
        ))
    }

    pub async fn count_unread(&self, user_id: Uuid) -> Result<u64, DbErr> {
        use entity::notification::Column;

        entity::prelude::Notification::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::DeliveredAt.is_not_null())
            .filter(Column::ReadAt.is_null())
            .count(self.db)
            .await
    }

    /// Every active notification of a user, without triggering user summaries.
    pub async fn find_active_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DbErr> {
        Ok(entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsActive.eq(true))
            .all(self.db)
            .await?
            .into_iter()
            .map(|e| Notification::from_entity(e, None))
            .collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        read_at: Option<DateTime<Utc>>,
        clicked_at: Option<DateTime<Utc>>,
        is_active: Option<bool>,
    ) -> Result<Notification, DbErr> {
        let mut active = entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Notification {} not found", id)))?
            .into_active_model();

        active.read_at = ActiveValue::Set(read_at);
        active.clicked_at = ActiveValue::Set(clicked_at);
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(self.with_triggering_users(vec![entity]).await?.remove(0))
    }

    /// Marks all of a user's unread active notifications as read.
    pub async fn mark_all_read(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<u64, DbErr> {
        use entity::notification::Column;

        let result = entity::prelude::Notification::update_many()
            .col_expr(Column::ReadAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::ReadAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn with_triggering_users(
        &self,
        entities: Vec<entity::notification::Model>,
    ) -> Result<Vec<Notification>, DbErr> {
        let ids: Vec<Uuid> = entities
            .iter()
            .filter_map(|e| e.triggered_by_user_id)
            .collect();
        let users = UserRepository::new(self.db).find_summaries(&ids).await?;

        Ok(entities
            .into_iter()
            .map(|e| {
                let user = e.triggered_by_user_id.and_then(|id| users.get(&id).cloned());
                Notification::from_entity(e, user)
            })
            .collect())
    }
}

fn active_model(
    params: CreateNotificationParams,
    now: DateTime<Utc>,
) -> entity::notification::ActiveModel {
    let delivered_at = params.delivered_at(now);

    entity::notification::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        user_id: ActiveValue::Set(params.user_id),
        triggered_by_user_id: ActiveValue::Set(params.triggered_by_user_id),
        title: ActiveValue::Set(params.title),
        message: ActiveValue::Set(params.message),
        notification_type: ActiveValue::Set(params.notification_type),
        priority: ActiveValue::Set(params.priority),
        data: ActiveValue::Set(params.data),
        action_url: ActiveValue::Set(params.action_url),
        action_text: ActiveValue::Set(params.action_text),
        image_url: ActiveValue::Set(params.image_url),
        category: ActiveValue::Set(params.category),
        read_at: ActiveValue::Set(None),
        delivered_at: ActiveValue::Set(delivered_at),
        clicked_at: ActiveValue::Set(None),
        scheduled_for: ActiveValue::Set(params.scheduled_for),
        is_active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
}
