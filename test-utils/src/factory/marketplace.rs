//! Marketplace item factory.

use chrono::Utc;
use entity::marketplace_item::{ItemCategory, ItemCondition, ItemStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating marketplace items.
///
/// Defaults to an active new supplement listing priced 19.99 with 10 slots and free
/// shipping.
pub struct ItemFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Uuid,
    title: String,
    category: ItemCategory,
    price: f64,
    shipping_cost: f64,
    available_slots: i32,
    status: ItemStatus,
    is_digital: bool,
    location: Option<String>,
}

impl<'a> ItemFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: Uuid) -> Self {
        Self {
            db,
            user_id,
            title: format!("Item {}", next_id()),
            category: ItemCategory::Supplements,
            price: 19.99,
            shipping_cost: 0.0,
            available_slots: 10,
            status: ItemStatus::Active,
            is_digital: false,
            location: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn shipping_cost(mut self, shipping_cost: f64) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }

    pub fn available_slots(mut self, available_slots: i32) -> Self {
        self.available_slots = available_slots;
        self
    }

    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_digital(mut self, is_digital: bool) -> Self {
        self.is_digital = is_digital;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub async fn build(self) -> Result<entity::marketplace_item::Model, DbErr> {
        let now = Utc::now();
        let condition = if self.is_digital {
            ItemCondition::Digital
        } else {
            ItemCondition::New
        };

        entity::marketplace_item::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(self.user_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set("A well described marketplace listing".to_string()),
            category: ActiveValue::Set(self.category),
            price: ActiveValue::Set(self.price),
            available_slots: ActiveValue::Set(self.available_slots),
            sold_count: ActiveValue::Set(0),
            condition: ActiveValue::Set(condition),
            status: ActiveValue::Set(self.status),
            images: ActiveValue::Set(json!([])),
            tags: ActiveValue::Set(json!([])),
            location: ActiveValue::Set(self.location),
            is_digital: ActiveValue::Set(self.is_digital),
            is_featured: ActiveValue::Set(false),
            specifications: ActiveValue::Set(None),
            brand: ActiveValue::Set(None),
            shipping_info: ActiveValue::Set(None),
            shipping_cost: ActiveValue::Set(self.shipping_cost),
            views_count: ActiveValue::Set(0),
            favorites_count: ActiveValue::Set(0),
            rating: ActiveValue::Set(0.0),
            reviews_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_item(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<entity::marketplace_item::Model, DbErr> {
    ItemFactory::new(db, user_id).build().await
}
