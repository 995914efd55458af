//! SeaORM entity definitions for the wellness backend.
//!
//! Every table in the schema has a module here holding its `Model`, `Column`,
//! `Relation` and any string-backed enumerations stored in its columns. The
//! `prelude` module re-exports the `Entity` types under their table names.

pub mod prelude;

pub mod analytics;
pub mod challenge;
pub mod challenge_participant;
pub mod challenge_progress;
pub mod comment;
pub mod comment_like;
pub mod dashboard_settings;
pub mod group;
pub mod group_membership;
pub mod health_log;
pub mod marketplace_favorite;
pub mod marketplace_item;
pub mod marketplace_order;
pub mod marketplace_review;
pub mod notification;
pub mod notification_preference;
pub mod post;
pub mod post_like;
pub mod reminder;
pub mod role;
pub mod user;
