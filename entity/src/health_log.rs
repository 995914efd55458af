use sea_orm::entity::prelude::*;

/// One log per user per calendar day.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "health_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub calories: Option<i32>,
    pub steps: Option<i32>,
    pub hydration_ml: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub sleep_hours: Option<f64>,
    pub vitamin_summary: Option<String>,
    pub additional_metrics: Option<Json>,
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
    User,
}

impl ActiveModelBehavior for ActiveModel {}
