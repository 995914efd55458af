use chrono::{DateTime, Utc};
use entity::{
    group::{GroupCategory, GroupType},
    group_membership::{MembershipRole, MembershipStatus},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::model::api::UserSummaryDto;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateGroupDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub category: GroupCategory,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(url)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
    pub settings: Option<Value>,
    #[validate(range(min = 1, max = 100000))]
    pub max_members: Option<i32>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateGroupDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub group_type: Option<GroupType>,
    pub category: Option<GroupCategory>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(url)]
    pub cover_image_url: Option<String>,
    pub rules: Option<Vec<String>>,
    #[validate(length(max = 20))]
    pub tags: Option<Vec<String>>,
    pub settings: Option<Value>,
    #[validate(range(min = 1, max = 100000))]
    pub max_members: Option<i32>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct JoinGroupDto {
    #[validate(length(max = 500))]
    pub join_message: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct UpdateMemberRoleDto {
    pub role: MembershipRole,
    pub status: Option<MembershipStatus>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct GroupListQuery {
    pub category: Option<GroupCategory>,
    #[serde(rename = "type")]
    pub group_type: Option<GroupType>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GroupDto {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
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
    /// Active members, present on single-group responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<GroupMemberDto>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GroupMemberDto {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub user: UserSummaryDto,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub join_message: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedGroupsDto {
    pub groups: Vec<GroupDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedMembersDto {
    pub members: Vec<GroupMemberDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
