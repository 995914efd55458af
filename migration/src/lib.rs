pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_posts_table;
mod m20250601_000003_create_post_likes_table;
mod m20250601_000004_create_comments_table;
mod m20250601_000005_create_comment_likes_table;
mod m20250602_000006_create_groups_table;
mod m20250602_000007_create_group_memberships_table;
mod m20250603_000008_create_challenges_table;
mod m20250603_000009_create_challenge_participants_table;
mod m20250603_000010_create_challenge_progress_table;
mod m20250604_000011_create_health_logs_table;
mod m20250604_000012_create_reminders_table;
mod m20250605_000013_create_marketplace_items_table;
mod m20250605_000014_create_marketplace_reviews_table;
mod m20250605_000015_create_marketplace_favorites_table;
mod m20250605_000016_create_marketplace_orders_table;
mod m20250606_000017_create_notifications_table;
mod m20250606_000018_create_notification_preferences_table;
mod m20250607_000019_create_analytics_table;
mod m20250607_000020_create_dashboard_settings_table;
mod m20250608_000021_create_roles_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_posts_table::Migration),
            Box::new(m20250601_000003_create_post_likes_table::Migration),
            Box::new(m20250601_000004_create_comments_table::Migration),
            Box::new(m20250601_000005_create_comment_likes_table::Migration),
            Box::new(m20250602_000006_create_groups_table::Migration),
            Box::new(m20250602_000007_create_group_memberships_table::Migration),
            Box::new(m20250603_000008_create_challenges_table::Migration),
            Box::new(m20250603_000009_create_challenge_participants_table::Migration),
            Box::new(m20250603_000010_create_challenge_progress_table::Migration),
            Box::new(m20250604_000011_create_health_logs_table::Migration),
            Box::new(m20250604_000012_create_reminders_table::Migration),
            Box::new(m20250605_000013_create_marketplace_items_table::Migration),
            Box::new(m20250605_000014_create_marketplace_reviews_table::Migration),
            Box::new(m20250605_000015_create_marketplace_favorites_table::Migration),
            Box::new(m20250605_000016_create_marketplace_orders_table::Migration),
            Box::new(m20250606_000017_create_notifications_table::Migration),
            Box::new(m20250606_000018_create_notification_preferences_table::Migration),
            Box::new(m20250607_000019_create_analytics_table::Migration),
            Box::new(m20250607_000020_create_dashboard_settings_table::Migration),
            Box::new(m20250608_000021_create_roles_table::Migration),
        ]
    }
}
