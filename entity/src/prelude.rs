pub use super::analytics::Entity as Analytics;
pub use super::challenge::Entity as Challenge;
pub use super::challenge_participant::Entity as ChallengeParticipant;
pub use super::challenge_progress::Entity as ChallengeProgress;
pub use super::comment::Entity as Comment;
pub use super::comment_like::Entity as CommentLike;
pub use super::dashboard_settings::Entity as DashboardSettings;
pub use super::group::Entity as Group;
pub use super::group_membership::Entity as GroupMembership;
pub use super::health_log::Entity as HealthLog;
pub use super::marketplace_favorite::Entity as MarketplaceFavorite;
pub use super::marketplace_item::Entity as MarketplaceItem;
pub use super::marketplace_order::Entity as MarketplaceOrder;
pub use super::marketplace_review::Entity as MarketplaceReview;
pub use super::notification::Entity as Notification;
pub use super::notification_preference::Entity as NotificationPreference;
pub use super::post::Entity as Post;
pub use super::post_like::Entity as PostLike;
pub use super::reminder::Entity as Reminder;
pub use super::role::Entity as Role;
pub use super::user::Entity as User;
