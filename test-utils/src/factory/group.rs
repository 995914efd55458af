//! Group and membership factories.

use chrono::Utc;
use entity::{
    group::{GroupCategory, GroupType},
    group_membership::{MembershipRole, MembershipStatus},
};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating groups.
///
/// The factory only inserts the group row. Pair it with `create_membership` for the
/// owner when a test relies on `member_count` matching active memberships.
pub struct GroupFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: Uuid,
    name: String,
    group_type: GroupType,
    category: GroupCategory,
    member_count: i32,
    max_members: Option<i32>,
}

impl<'a> GroupFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, owner_id: Uuid) -> Self {
        Self {
            db,
            owner_id,
            name: format!("Group {}", next_id()),
            group_type: GroupType::Public,
            category: GroupCategory::Fitness,
            member_count: 1,
            max_members: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn group_type(mut self, group_type: GroupType) -> Self {
        self.group_type = group_type;
        self
    }

    pub fn category(mut self, category: GroupCategory) -> Self {
        self.category = category;
        self
    }

    pub fn member_count(mut self, member_count: i32) -> Self {
        self.member_count = member_count;
        self
    }

    pub fn max_members(mut self, max_members: i32) -> Self {
        self.max_members = Some(max_members);
        self
    }

    pub async fn build(self) -> Result<entity::group::Model, DbErr> {
        let now = Utc::now();
        entity::group::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            group_type: ActiveValue::Set(self.group_type),
            category: ActiveValue::Set(self.category),
            image_url: ActiveValue::Set(None),
            cover_image_url: ActiveValue::Set(None),
            rules: ActiveValue::Set(json!([])),
            tags: ActiveValue::Set(json!([])),
            settings: ActiveValue::Set(None),
            member_count: ActiveValue::Set(self.member_count),
            max_members: ActiveValue::Set(self.max_members),
            is_active: ActiveValue::Set(true),
            is_featured: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a public fitness group owned by `owner_id` together with the owner membership.
pub async fn create_group(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<entity::group::Model, DbErr> {
    let group = GroupFactory::new(db, owner_id).build().await?;
    create_membership(
        db,
        group.id,
        owner_id,
        MembershipRole::Owner,
        MembershipStatus::Active,
    )
    .await?;
    Ok(group)
}

/// Inserts a membership row without adjusting the group's `member_count`.
pub async fn create_membership(
    db: &DatabaseConnection,
    group_id: Uuid,
    user_id: Uuid,
    role: MembershipRole,
    status: MembershipStatus,
) -> Result<entity::group_membership::Model, DbErr> {
    let now = Utc::now();
    let joined_at = (status == MembershipStatus::Active).then_some(now);

    entity::group_membership::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        group_id: ActiveValue::Set(group_id),
        user_id: ActiveValue::Set(user_id),
        role: ActiveValue::Set(role),
        status: ActiveValue::Set(status),
        join_message: ActiveValue::Set(None),
        joined_at: ActiveValue::Set(joined_at),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
