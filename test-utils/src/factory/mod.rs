//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each table that tests commonly need has a `Factory`
//! builder for customization and a `create_*` convenience function for quick default
//! creation. Factories insert rows directly, bypassing service rules, so tests can set
//! up states (full groups, completed challenges) that the API would not produce in one call.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(&db).await?;
//! let post = factory::post::PostFactory::new(&db, user.id)
//!     .visibility(PostVisibility::Private)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users
//! - `post` - Posts and comments
//! - `group` - Groups and memberships
//! - `challenge` - Challenges, participants and progress rows
//! - `tracking` - Health logs and reminders
//! - `marketplace` - Marketplace items
//! - `notification` - Notifications
//! - `analytics` - Analytics rows
//! - `helpers` - Unique id generation

pub mod analytics;
pub mod challenge;
pub mod group;
pub mod helpers;
pub mod marketplace;
pub mod notification;
pub mod post;
pub mod tracking;
pub mod user;

pub use analytics::create_analytics;
pub use challenge::{create_challenge, create_participant, create_progress};
pub use group::{create_group, create_membership};
pub use marketplace::create_item;
pub use notification::create_notification;
pub use post::{create_comment, create_post};
pub use tracking::{create_health_log, create_reminder};
pub use user::create_user;
