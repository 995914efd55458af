//! Group and membership domain models.

use chrono::{DateTime, Utc};
use entity::{
    group::{GroupCategory, GroupType},
    group_membership::{MembershipRole, MembershipStatus},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    model::group::{
        CreateGroupDto, GroupDto, GroupMemberDto, PaginatedGroupsDto, PaginatedMembersDto,
        UpdateGroupDto,
    },
    server::{
        model::user::UserSummary,
        util::{json::string_list, pagination::Page},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub group_type: GroupType,
    pub category: GroupCategory,
    pub image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub rules: Vec<String>,
    pub tags: Vec<String>,
    pub settings: Option<Value>,
    pub member_count: i32,
    pub max_members: Option<i32>,
    pub is_active: bool,
    pub is_featured: bool,
    pub members: Option<Vec<GroupMember>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn from_entity(entity: entity::group::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            description: entity.description,
            group_type: entity.group_type,
            category: entity.category,
            image_url: entity.image_url,
            cover_image_url: entity.cover_image_url,
            rules: string_list(&entity.rules),
            tags: string_list(&entity.tags),
            settings: entity.settings,
            member_count: entity.member_count,
            max_members: entity.max_members,
            is_active: entity.is_active,
            is_featured: entity.is_featured,
            members: None,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> GroupDto {
        GroupDto {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            group_type: self.group_type,
            category: self.category,
            image_url: self.image_url,
            cover_image_url: self.cover_image_url,
            rules: self.rules,
            tags: self.tags,
            settings: self.settings,
            member_count: self.member_count,
            max_members: self.max_members,
            is_active: self.is_active,
            is_featured: self.is_featured,
            members: self
                .members
                .map(|members| members.into_iter().map(GroupMember::into_dto).collect()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Whether `max_members` has been reached. Groups without a cap are never full.
    pub fn is_full(&self) -> bool {
        self.max_members
            .is_some_and(|max| self.member_count >= max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMember {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub user: UserSummary,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub join_message: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl GroupMember {
    pub fn from_entity(entity: entity::group_membership::Model, user: UserSummary) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            user_id: entity.user_id,
            user,
            role: entity.role,
            status: entity.status,
            join_message: entity.join_message,
            joined_at: entity.joined_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> GroupMemberDto {
        GroupMemberDto {
            id: self.id,
            group_id: self.group_id,
            user_id: self.user_id,
            user: self.user.into_dto(),
            role: self.role,
            status: self.status,
            join_message: self.join_message,
            joined_at: self.joined_at,
            created_at: self.created_at,
        }
    }
}

/// Status a new join request starts in. Only public groups admit members directly.
pub fn initial_join_status(group_type: GroupType) -> MembershipStatus {
    match group_type {
        GroupType::Public => MembershipStatus::Active,
        GroupType::Private | GroupType::InviteOnly => MembershipStatus::Pending,
    }
}

/// Change to `member_count` when a membership moves between statuses.
pub fn member_count_delta(from: MembershipStatus, to: MembershipStatus) -> i32 {
    match (from == MembershipStatus::Active, to == MembershipStatus::Active) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupFilter {
    pub category: Option<GroupCategory>,
    pub group_type: Option<GroupType>,
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateGroupParams {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub group_type: GroupType,
    pub category: GroupCategory,
    pub image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub rules: Vec<String>,
    pub tags: Vec<String>,
    pub settings: Option<Value>,
    pub max_members: Option<i32>,
}

impl CreateGroupParams {
    pub fn from_dto(owner_id: Uuid, dto: CreateGroupDto) -> Self {
        Self {
            owner_id,
            name: dto.name,
            description: dto.description,
            group_type: dto.group_type,
            category: dto.category,
            image_url: dto.image_url,
            cover_image_url: dto.cover_image_url,
            rules: dto.rules,
            tags: dto.tags,
            settings: dto.settings,
            max_members: dto.max_members,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGroupParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub group_type: Option<GroupType>,
    pub category: Option<GroupCategory>,
    pub image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub rules: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub settings: Option<Value>,
    pub max_members: Option<i32>,
}

impl UpdateGroupParams {
    pub fn from_dto(dto: UpdateGroupDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            group_type: dto.group_type,
            category: dto.category,
            image_url: dto.image_url,
            cover_image_url: dto.cover_image_url,
            rules: dto.rules,
            tags: dto.tags,
            settings: dto.settings,
            max_members: dto.max_members,
        }
    }
}

pub fn paginated_groups_dto(page: Page<Group>) -> PaginatedGroupsDto {
    let page = page.map(Group::into_dto);

    PaginatedGroupsDto {
        groups: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

pub fn paginated_members_dto(page: Page<GroupMember>) -> PaginatedMembersDto {
    let page = page.map(GroupMember::into_dto);

    PaginatedMembersDto {
        members: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_public_groups_activate_on_join() {
        assert_eq!(initial_join_status(GroupType::Public), MembershipStatus::Active);
        assert_eq!(initial_join_status(GroupType::Private), MembershipStatus::Pending);
        assert_eq!(initial_join_status(GroupType::InviteOnly), MembershipStatus::Pending);
    }

    #[test]
    fn member_count_follows_active_transitions() {
        use MembershipStatus::*;

        assert_eq!(member_count_delta(Pending, Active), 1);
        assert_eq!(member_count_delta(Active, Left), -1);
        assert_eq!(member_count_delta(Active, Banned), -1);
        assert_eq!(member_count_delta(Active, Active), 0);
        assert_eq!(member_count_delta(Pending, Banned), 0);
    }
}
