use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[sea_orm(string_value = "reminder")]
    Reminder,
    #[sea_orm(string_value = "achievement")]
    Achievement,
    #[sea_orm(string_value = "challenge_invite")]
    ChallengeInvite,
    #[sea_orm(string_value = "challenge_update")]
    ChallengeUpdate,
    #[sea_orm(string_value = "social_activity")]
    SocialActivity,
    #[sea_orm(string_value = "health_insight")]
    HealthInsight,
    #[sea_orm(string_value = "goal_milestone")]
    GoalMilestone,
    #[sea_orm(string_value = "system_update")]
    SystemUpdate,
    #[sea_orm(string_value = "friend_request")]
    FriendRequest,
    #[sea_orm(string_value = "post_like")]
    PostLike,
    #[sea_orm(string_value = "post_comment")]
    PostComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub triggered_by_user_id: Option<Uuid>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub data: Option<Json>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub read_at: Option<DateTimeUtc>,
    pub delivered_at: Option<DateTimeUtc>,
    pub clicked_at: Option<DateTimeUtc>,
    pub scheduled_for: Option<DateTimeUtc>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Recipient,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TriggeredByUserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    TriggeredBy,
}

impl ActiveModelBehavior for ActiveModel {}
