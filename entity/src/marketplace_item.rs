use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    #[sea_orm(string_value = "supplements")]
    Supplements,
    #[sea_orm(string_value = "fitness_equipment")]
    FitnessEquipment,
    #[sea_orm(string_value = "nutrition")]
    Nutrition,
    #[sea_orm(string_value = "wellness_products")]
    WellnessProducts,
    #[sea_orm(string_value = "clothing")]
    Clothing,
    #[sea_orm(string_value = "books_guides")]
    BooksGuides,
    #[sea_orm(string_value = "services")]
    Services,
    #[sea_orm(string_value = "coaching")]
    Coaching,
    #[sea_orm(string_value = "meal_plans")]
    MealPlans,
    #[sea_orm(string_value = "workout_programs")]
    WorkoutPrograms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "like_new")]
    LikeNew,
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "fair")]
    Fair,
    #[sea_orm(string_value = "digital")]
    Digital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "sold_out")]
    SoldOut,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "removed")]
    Removed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "marketplace_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: ItemCategory,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub available_slots: i32,
    pub sold_count: i32,
    pub condition: ItemCondition,
    pub status: ItemStatus,
    pub images: Json,
    pub tags: Json,
    pub location: Option<String>,
    pub is_digital: bool,
    pub is_featured: bool,
    pub specifications: Option<Json>,
    pub brand: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub shipping_info: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub shipping_cost: f64,
    pub views_count: i32,
    pub favorites_count: i32,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub reviews_count: i32,
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
    Seller,
}

impl ActiveModelBehavior for ActiveModel {}
