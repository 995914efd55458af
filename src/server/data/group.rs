use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    model::group::{CreateGroupParams, Group, GroupFilter, UpdateGroupParams},
    util::{
        json::to_json_list,
        pagination::{Page, PageRequest},
        search::contains_ignore_case,
    },
};

pub struct GroupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a group counting its owner as the first member.
    ///
    /// The owner membership row itself is created by the caller.
    pub async fn create(&self, params: CreateGroupParams) -> Result<Group, DbErr> {
        let now = Utc::now();

        let entity = entity::group::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            owner_id: ActiveValue::Set(params.owner_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            group_type: ActiveValue::Set(params.group_type),
            category: ActiveValue::Set(params.category),
            image_url: ActiveValue::Set(params.image_url),
            cover_image_url: ActiveValue::Set(params.cover_image_url),
            rules: ActiveValue::Set(to_json_list(&params.rules)),
            tags: ActiveValue::Set(to_json_list(&params.tags)),
            settings: ActiveValue::Set(params.settings),
            member_count: ActiveValue::Set(1),
            max_members: ActiveValue::Set(params.max_members),
            is_active: ActiveValue::Set(true),
            is_featured: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Group::from_entity(entity))
    }

    /// Finds a group by id regardless of its active flag.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, DbErr> {
        Ok(entity::prelude::Group::find_by_id(id)
            .one(self.db)
            .await?
            .map(Group::from_entity))
    }

    /// Lists active groups matching `filter`, newest first.
    pub async fn find_many(
        &self,
        filter: &GroupFilter,
        request: PageRequest,
    ) -> Result<Page<Group>, DbErr> {
        let mut query =
            entity::prelude::Group::find().filter(entity::group::Column::IsActive.eq(true));

        if let Some(category) = filter.category {
            query = query.filter(entity::group::Column::Category.eq(category));
        }
        if let Some(group_type) = filter.group_type {
            query = query.filter(entity::group::Column::GroupType.eq(group_type));
        }
        if let Some(term) = filter.search.as_deref() {
            query = query.filter(contains_ignore_case(
                &["groups.name", "groups.description"],
                term,
            ));
        }

        let paginator = query
            .order_by_desc(entity::group::Column::CreatedAt)
            .order_by_asc(entity::group::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let groups = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Group::from_entity)
            .collect();

        Ok(Page::new(groups, total, request))
    }

    pub async fn update(&self, id: Uuid, params: UpdateGroupParams) -> Result<Group, DbErr> {
        let mut active = self.load(id).await?.into_active_model();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(group_type) = params.group_type {
            active.group_type = ActiveValue::Set(group_type);
        }
        if let Some(category) = params.category {
            active.category = ActiveValue::Set(category);
        }
        if let Some(image_url) = params.image_url {
            active.image_url = ActiveValue::Set(Some(image_url));
        }
        if let Some(cover_image_url) = params.cover_image_url {
            active.cover_image_url = ActiveValue::Set(Some(cover_image_url));
        }
        if let Some(rules) = params.rules {
            active.rules = ActiveValue::Set(to_json_list(&rules));
        }
        if let Some(tags) = params.tags {
            active.tags = ActiveValue::Set(to_json_list(&tags));
        }
        if let Some(settings) = params.settings {
            active.settings = ActiveValue::Set(Some(settings));
        }
        if let Some(max_members) = params.max_members {
            active.max_members = ActiveValue::Set(Some(max_members));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Group::from_entity(active.update(self.db).await?))
    }

    /// Soft deletes a group.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), DbErr> {
        let mut active = self.load(id).await?.into_active_model();
        active.is_active = ActiveValue::Set(false);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Adds `delta` to `member_count` in a single `UPDATE` and returns the new value.
    ///
    /// Increments only apply while the group is below `max_members`, and decrements only
    /// while the counter stays non-negative.
    ///
    /// # Returns
    /// - `Ok(Some(i32))` - New counter value
    /// - `Ok(None)` - Group is full, or the counter is already zero
    /// - `Err(DbErr::RecordNotFound)` - Group does not exist
    pub async fn adjust_member_count(&self, id: Uuid, delta: i32) -> Result<Option<i32>, DbErr> {
        let mut update = entity::prelude::Group::update_many()
            .col_expr(
                entity::group::Column::MemberCount,
                Expr::col(entity::group::Column::MemberCount).add(delta),
            )
            .col_expr(entity::group::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::group::Column::Id.eq(id))
            .filter(entity::group::Column::MemberCount.gte(Ord::max(-delta, 0)));

        if delta > 0 {
            update = update.filter(
                Condition::any()
                    .add(entity::group::Column::MaxMembers.is_null())
                    .add(
                        Expr::col(entity::group::Column::MemberCount)
                            .add(delta)
                            .lte(Expr::col(entity::group::Column::MaxMembers)),
                    ),
            );
        }

        let result = update.exec(self.db).await?;
        let model = self.load(id).await?;

        Ok((result.rows_affected > 0).then_some(model.member_count))
    }

    async fn load(&self, id: Uuid) -> Result<entity::group::Model, DbErr> {
        entity::prelude::Group::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Group {} not found", id)))
    }
}
