use entity::group_membership::{MembershipRole, MembershipStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{group::GroupRepository, group_membership::GroupMembershipRepository},
    error::AppError,
    model::group::{
        initial_join_status, member_count_delta, CreateGroupParams, Group, GroupFilter,
        GroupMember, UpdateGroupParams,
    },
    util::pagination::{Page, PageRequest},
};

pub struct GroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a group with the caller as its active owner member.
    pub async fn create(&self, params: CreateGroupParams) -> Result<Group, AppError> {
        let txn = self.db.begin().await?;

        let owner_id = params.owner_id;
        let group = GroupRepository::new(&txn).create(params).await?;
        GroupMembershipRepository::new(&txn)
            .create(
                group.id,
                owner_id,
                MembershipRole::Owner,
                MembershipStatus::Active,
                None,
            )
            .await?;

        txn.commit().await?;

        Ok(group)
    }

    pub async fn find_many(
        &self,
        filter: GroupFilter,
        request: PageRequest,
    ) -> Result<Page<Group>, AppError> {
        Ok(GroupRepository::new(self.db)
            .find_many(&filter, request)
            .await?)
    }

    /// Gets an active group together with its active members.
    pub async fn get(&self, id: Uuid) -> Result<Group, AppError> {
        let mut group = active_group(self.db, id).await?;
        group.members = Some(
            GroupMembershipRepository::new(self.db)
                .all_active_members(id)
                .await?,
        );

        Ok(group)
    }

    /// Updates group details.
    ///
    /// # Access Control
    /// - The owner or an active admin
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateGroupParams,
    ) -> Result<Group, AppError> {
        let group = active_group(self.db, id).await?;
        ensure_manager(self.db, &group, caller_id, "Only group owners and admins can update the group")
            .await?;

        Ok(GroupRepository::new(self.db).update(id, params).await?)
    }

    /// Soft deletes a group. Owner only.
    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let group = active_group(self.db, id).await?;
        if group.owner_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the group owner can delete the group".to_string(),
            ));
        }

        GroupRepository::new(self.db).deactivate(id).await?;

        Ok(())
    }

    /// Requests membership in a group.
    ///
    /// Public groups admit the caller immediately and bump `member_count`. Private and
    /// invite-only groups record a pending request. A membership the caller previously
    /// left is reused.
    ///
    /// # Returns
    /// - `Ok(GroupMember)` - Active or pending membership
    /// - `Err(AppError::NotFound)` - Group missing or inactive
    /// - `Err(AppError::Conflict)` - Already a member, pending, banned, or the group is full
    pub async fn join(
        &self,
        caller_id: Uuid,
        id: Uuid,
        join_message: Option<String>,
    ) -> Result<GroupMember, AppError> {
        let txn = self.db.begin().await?;
        let memberships = GroupMembershipRepository::new(&txn);

        let group = active_group(&txn, id).await?;
        let existing = memberships.find(id, caller_id).await?;

        if let Some(membership) = &existing {
            if membership.status != MembershipStatus::Left {
                return Err(AppError::Conflict(
                    "You already have a membership in this group".to_string(),
                ));
            }
        }
        if group.is_full() {
            return Err(AppError::Conflict("Group is full".to_string()));
        }

        let status = initial_join_status(group.group_type);
        let membership = match existing {
            Some(membership) => {
                memberships
                    .update(membership.id, Some(MembershipRole::Member), status, join_message)
                    .await?
            }
            None => {
                memberships
                    .create(id, caller_id, MembershipRole::Member, status, join_message)
                    .await?
            }
        };

        if status == MembershipStatus::Active {
            adjust_member_count(&txn, id, 1).await?;
        }

        let member = memberships.with_user(membership).await?;
        txn.commit().await?;

        Ok(member)
    }

    /// Leaves a group.
    ///
    /// # Returns
    /// - `Err(AppError::Forbidden)` - Caller owns the group
    /// - `Err(AppError::NotFound)` - Caller is not a member
    pub async fn leave(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let memberships = GroupMembershipRepository::new(&txn);

        let group = active_group(&txn, id).await?;
        if group.owner_id == caller_id {
            return Err(AppError::Forbidden(
                "The group owner cannot leave the group".to_string(),
            ));
        }

        let membership = memberships
            .find(id, caller_id)
            .await?
            .filter(|m| m.status != MembershipStatus::Left)
            .ok_or_else(|| AppError::not_found("Membership"))?;

        memberships
            .update(membership.id, None, MembershipStatus::Left, None)
            .await?;

        let delta = member_count_delta(membership.status, MembershipStatus::Left);
        if delta != 0 {
            adjust_member_count(&txn, id, delta).await?;
        }

        txn.commit().await?;

        Ok(())
    }

    pub async fn members(
        &self,
        id: Uuid,
        request: PageRequest,
    ) -> Result<Page<GroupMember>, AppError> {
        active_group(self.db, id).await?;

        Ok(GroupMembershipRepository::new(self.db)
            .find_active_members(id, request)
            .await?)
    }

    /// Changes a member's role and optionally their status.
    ///
    /// Approving a pending member counts them towards `member_count`, and removing an
    /// active member takes them out of it.
    ///
    /// # Access Control
    /// - The owner or an active admin
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Assigning the owner role or changing the owner
    /// - `Err(AppError::NotFound)` - Target user has no membership
    /// - `Err(AppError::Conflict)` - Approval would exceed `max_members`
    pub async fn update_member_role(
        &self,
        caller_id: Uuid,
        id: Uuid,
        user_id: Uuid,
        role: MembershipRole,
        status: Option<MembershipStatus>,
    ) -> Result<GroupMember, AppError> {
        let txn = self.db.begin().await?;
        let memberships = GroupMembershipRepository::new(&txn);

        let group = active_group(&txn, id).await?;
        ensure_manager(&txn, &group, caller_id, "Only group owners and admins can manage members")
            .await?;

        if role == MembershipRole::Owner {
            return Err(AppError::BadRequest(
                "The owner role cannot be assigned".to_string(),
            ));
        }

        let target = memberships
            .find(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Membership"))?;

        if target.role == MembershipRole::Owner {
            return Err(AppError::BadRequest(
                "The owner's role cannot be changed".to_string(),
            ));
        }

        let next_status = status.unwrap_or(target.status);
        let delta = member_count_delta(target.status, next_status);
        if delta > 0 && group.is_full() {
            return Err(AppError::Conflict("Group is full".to_string()));
        }

        let updated = memberships
            .update(target.id, Some(role), next_status, None)
            .await?;
        if delta != 0 {
            adjust_member_count(&txn, id, delta).await?;
        }

        let member = memberships.with_user(updated).await?;
        txn.commit().await?;

        Ok(member)
    }
}

/// Applies a membership change to `member_count`, refusing to overfill the group.
async fn adjust_member_count<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    delta: i32,
) -> Result<i32, AppError> {
    GroupRepository::new(db)
        .adjust_member_count(id, delta)
        .await?
        .ok_or_else(|| {
            if delta > 0 {
                AppError::Conflict("Group is full".to_string())
            } else {
                AppError::Conflict("Group has no active members to remove".to_string())
            }
        })
}

async fn active_group<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Group, AppError> {
    GroupRepository::new(db)
        .find_by_id(id)
        .await?
        .filter(|g| g.is_active)
        .ok_or_else(|| AppError::not_found("Group"))
}

async fn ensure_manager<C: ConnectionTrait>(
    db: &C,
    group: &Group,
    caller_id: Uuid,
    message: &str,
) -> Result<(), AppError> {
    if group.owner_id == caller_id {
        return Ok(());
    }

    let membership = GroupMembershipRepository::new(db)
        .find(group.id, caller_id)
        .await?;

    match membership {
        Some(m)
            if m.status == MembershipStatus::Active && m.role == MembershipRole::Admin =>
        {
            Ok(())
        }
        _ => Err(AppError::Forbidden(message.to_string())),
    }
}
