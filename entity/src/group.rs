use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Controls whether a join request is activated immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    #[sea_orm(string_value = "public")]
    Public,
    #[sea_orm(string_value = "private")]
    Private,
    #[sea_orm(string_value = "invite_only")]
    InviteOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum GroupCategory {
    #[sea_orm(string_value = "fitness")]
    Fitness,
    #[sea_orm(string_value = "nutrition")]
    Nutrition,
    #[sea_orm(string_value = "mental_health")]
    MentalHealth,
    #[sea_orm(string_value = "weight_loss")]
    WeightLoss,
    #[sea_orm(string_value = "muscle_building")]
    MuscleBuilding,
    #[sea_orm(string_value = "running")]
    Running,
    #[sea_orm(string_value = "yoga")]
    Yoga,
    #[sea_orm(string_value = "general")]
    General,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub group_type: GroupType,
    pub category: GroupCategory,
    pub image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub rules: Json,
    pub tags: Json,
    pub settings: Option<Json>,
    pub member_count: i32,
    pub max_members: Option<i32>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
