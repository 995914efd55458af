use chrono::{DateTime, Utc};
use entity::group_membership::{MembershipRole, MembershipStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::user::{summary_or_unknown, UserRepository},
    model::group::GroupMember,
    util::pagination::{Page, PageRequest},
};

pub struct GroupMembershipRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupMembershipRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        role: MembershipRole,
        status: MembershipStatus,
        join_message: Option<String>,
    ) -> Result<entity::group_membership::Model, DbErr> {
        let now = Utc::now();

        entity::group_membership::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            group_id: ActiveValue::Set(group_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role),
            status: ActiveValue::Set(status),
            join_message: ActiveValue::Set(join_message),
            joined_at: ActiveValue::Set(joined_at_for(status, now)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    /// Finds the membership of `user_id` in `group_id` in any status.
    pub async fn find(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<entity::group_membership::Model>, DbErr> {
        entity::prelude::GroupMembership::find()
            .filter(entity::group_membership::Column::GroupId.eq(group_id))
            .filter(entity::group_membership::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Sets the status and optionally the role of a membership.
    ///
    /// `joined_at` is stamped the first time a membership becomes active.
    pub async fn update(
        &self,
        id: Uuid,
        role: Option<MembershipRole>,
        status: MembershipStatus,
        join_message: Option<String>,
    ) -> Result<entity::group_membership::Model, DbErr> {
        let model = entity::prelude::GroupMembership::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Membership {} not found", id)))?;

        let now = Utc::now();
        let previous_status = model.status;
        let mut active = model.into_active_model();

        if let Some(role) = role {
            active.role = ActiveValue::Set(role);
        }
        if let Some(join_message) = join_message {
            active.join_message = ActiveValue::Set(Some(join_message));
        }
        if status == MembershipStatus::Active && previous_status != MembershipStatus::Active {
            active.joined_at = ActiveValue::Set(Some(now));
        }
        active.status = ActiveValue::Set(status);
        active.updated_at = ActiveValue::Set(now);

        active.update(self.db).await
    }

    /// Lists active members of a group, most recently joined first.
    pub async fn find_active_members(
        &self,
        group_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<GroupMember>, DbErr> {
        let paginator = entity::prelude::GroupMembership::find()
            .filter(entity::group_membership::Column::GroupId.eq(group_id))
            .filter(entity::group_membership::Column::Status.eq(MembershipStatus::Active))
            .order_by_desc(entity::group_membership::Column::JoinedAt)
            .order_by_asc(entity::group_membership::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        Ok(Page::new(self.with_users(entities).await?, total, request))
    }

    /// All active members of a group, most recently joined first.
    pub async fn all_active_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>, DbErr> {
        let entities = entity::prelude::GroupMembership::find()
            .filter(entity::group_membership::Column::GroupId.eq(group_id))
            .filter(entity::group_membership::Column::Status.eq(MembershipStatus::Active))
            .order_by_desc(entity::group_membership::Column::JoinedAt)
            .order_by_asc(entity::group_membership::Column::Id)
            .all(self.db)
            .await?;

        self.with_users(entities).await
    }

    pub async fn count_active(&self, group_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::GroupMembership::find()
            .filter(entity::group_membership::Column::GroupId.eq(group_id))
            .filter(entity::group_membership::Column::Status.eq(MembershipStatus::Active))
            .count(self.db)
            .await
    }

    pub async fn with_user(
        &self,
        entity: entity::group_membership::Model,
    ) -> Result<GroupMember, DbErr> {
        Ok(self.with_users(vec![entity]).await?.remove(0))
    }

    async fn with_users(
        &self,
        entities: Vec<entity::group_membership::Model>,
    ) -> Result<Vec<GroupMember>, DbErr> {
        let user_ids: Vec<Uuid> = entities.iter().map(|e| e.user_id).collect();
        let users = UserRepository::new(self.db).find_summaries(&user_ids).await?;

        Ok(entities
            .into_iter()
            .map(|e| {
                let user = summary_or_unknown(&users, e.user_id);
                GroupMember::from_entity(e, user)
            })
            .collect())
    }
}

fn joined_at_for(status: MembershipStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (status == MembershipStatus::Active).then_some(now)
}
