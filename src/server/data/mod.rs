//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! parameter models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these repositories.

pub mod analytics;
pub mod challenge;
pub mod challenge_participant;
pub mod challenge_progress;
pub mod comment;
pub mod dashboard_settings;
pub mod group;
pub mod group_membership;
pub mod health_log;
pub mod identity;
pub mod marketplace_favorite;
pub mod marketplace_item;
pub mod marketplace_order;
pub mod marketplace_review;
pub mod notification;
pub mod notification_preference;
pub mod post;
pub mod reminder;
pub mod role;
pub mod user;

#[cfg(test)]
mod test;
