use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// The `with_*_tables` helpers are idempotent per table, so they can be combined
/// freely (`with_social_tables().with_group_tables()`).
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, HealthLog};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(HealthLog)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements to execute during database setup, in insertion order.
    tables: Vec<TableCreateStatement>,
    /// Names of tables already queued, used to skip duplicates.
    names: Vec<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables). Adding the same entity twice is a no-op.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let name = entity.table_name().to_string();
        if self.names.contains(&name) {
            return self;
        }

        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self.names.push(name);
        self
    }

    /// Adds users, posts, post likes, comments and comment likes.
    pub fn with_social_tables(self) -> Self {
        self.with_table(User)
            .with_table(Post)
            .with_table(PostLike)
            .with_table(Comment)
            .with_table(CommentLike)
    }

    /// Adds users, groups and group memberships.
    pub fn with_group_tables(self) -> Self {
        self.with_table(User)
            .with_table(Group)
            .with_table(GroupMembership)
    }

    /// Adds users, challenges, participants and daily progress.
    pub fn with_challenge_tables(self) -> Self {
        self.with_table(User)
            .with_table(Challenge)
            .with_table(ChallengeParticipant)
            .with_table(ChallengeProgress)
    }

    /// Adds users, health logs and reminders.
    pub fn with_tracking_tables(self) -> Self {
        self.with_table(User)
            .with_table(HealthLog)
            .with_table(Reminder)
    }

    /// Adds users, marketplace items, reviews, favorites and orders.
    pub fn with_marketplace_tables(self) -> Self {
        self.with_table(User)
            .with_table(MarketplaceItem)
            .with_table(MarketplaceReview)
            .with_table(MarketplaceFavorite)
            .with_table(MarketplaceOrder)
    }

    /// Adds users, notifications and notification preferences.
    pub fn with_notification_tables(self) -> Self {
        self.with_table(User)
            .with_table(Notification)
            .with_table(NotificationPreference)
    }

    /// Adds users, analytics rows and dashboard settings.
    pub fn with_analytics_tables(self) -> Self {
        self.with_table(User)
            .with_table(Analytics)
            .with_table(DashboardSettings)
    }

    /// Adds roles.
    pub fn with_role_tables(self) -> Self {
        self.with_table(Role)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_social_tables()
            .with_group_tables()
            .with_challenge_tables()
            .with_tracking_tables()
            .with_marketplace_tables()
            .with_notification_tables()
            .with_analytics_tables()
            .with_role_tables()
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements in the order they were added.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
