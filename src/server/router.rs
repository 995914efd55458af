use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::server::{
    controller::{
        analytics, auth, challenge, comment, group, health_log, marketplace, notification, post,
        reminder, role, user,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Auth gateway
        .route("/api/auth/verify-token", post(auth::verify_token))
        .route("/api/auth/webhook/supabase", post(auth::supabase_webhook))
        // Users
        .route("/api/users", post(user::create_user).get(user::get_users))
        .route("/api/users/me", get(user::get_me))
        .route(
            "/api/users/{id}",
            get(user::get_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
        // Roles
        .route("/api/roles", post(role::create_role).get(role::get_roles))
        .route(
            "/api/roles/{id}",
            get(role::get_role)
                .patch(role::update_role)
                .delete(role::delete_role),
        )
        // Posts
        .route("/api/posts", post(post::create_post))
        .route("/api/posts/public", get(post::get_public_posts))
        .route("/api/posts/search", get(post::search_posts))
        .route("/api/posts/user/{user_id}", get(post::get_user_posts))
        .route(
            "/api/posts/{id}",
            get(post::get_post)
                .patch(post::update_post)
                .delete(post::delete_post),
        )
        .route("/api/posts/{id}/stats", get(post::get_post_stats))
        .route("/api/posts/{id}/like", post(post::toggle_post_like))
        // Comments
        .route("/api/comments", post(comment::create_comment))
        .route("/api/comments/post/{post_id}", get(comment::get_post_comments))
        .route(
            "/api/comments/{id}",
            get(comment::get_comment)
                .patch(comment::update_comment)
                .delete(comment::delete_comment),
        )
        .route("/api/comments/{id}/replies", get(comment::get_comment_replies))
        .route("/api/comments/{id}/like", post(comment::toggle_comment_like))
        // Groups
        .route("/api/groups", post(group::create_group).get(group::get_groups))
        .route(
            "/api/groups/{id}",
            get(group::get_group)
                .patch(group::update_group)
                .delete(group::delete_group),
        )
        .route("/api/groups/{id}/join", post(group::join_group))
        .route("/api/groups/{id}/leave", post(group::leave_group))
        .route("/api/groups/{id}/members", get(group::get_group_members))
        .route(
            "/api/groups/{id}/members/{user_id}/role",
            patch(group::update_member_role),
        )
        // Challenges
        .route("/api/challenges", post(challenge::create_challenge))
        .route("/api/challenges/public", get(challenge::get_public_challenges))
        .route(
            "/api/challenges/creator/{creator_id}",
            get(challenge::get_creator_challenges),
        )
        .route("/api/challenges/user/{user_id}", get(challenge::get_user_challenges))
        .route(
            "/api/challenges/{id}",
            get(challenge::get_challenge)
                .patch(challenge::update_challenge)
                .delete(challenge::delete_challenge),
        )
        .route("/api/challenges/{id}/join", post(challenge::join_challenge))
        .route("/api/challenges/{id}/leave", delete(challenge::leave_challenge))
        .route("/api/challenges/{id}/progress", post(challenge::record_progress))
        .route(
            "/api/challenges/{id}/progress/{user_id}",
            get(challenge::get_user_progress),
        )
        .route("/api/challenges/{id}/leaderboard", get(challenge::get_leaderboard))
        // Health logs
        .route("/api/health-logs", post(health_log::create_health_log))
        .route(
            "/api/health-logs/user/{user_id}",
            get(health_log::get_user_health_logs),
        )
        .route(
            "/api/health-logs/user/{user_id}/stats",
            get(health_log::get_health_stats),
        )
        .route(
            "/api/health-logs/user/{user_id}/range",
            get(health_log::get_health_logs_in_range),
        )
        .route(
            "/api/health-logs/{id}",
            get(health_log::get_health_log)
                .patch(health_log::update_health_log)
                .delete(health_log::delete_health_log),
        )
        // Reminders
        .route("/api/reminders", post(reminder::create_reminder))
        .route("/api/reminders/user/{user_id}", get(reminder::get_user_reminders))
        .route(
            "/api/reminders/user/{user_id}/upcoming",
            get(reminder::get_upcoming_reminders),
        )
        .route(
            "/api/reminders/user/{user_id}/stats",
            get(reminder::get_reminder_stats),
        )
        .route(
            "/api/reminders/{id}",
            get(reminder::get_reminder)
                .patch(reminder::update_reminder)
                .delete(reminder::delete_reminder),
        )
        .route("/api/reminders/{id}/status", patch(reminder::update_reminder_status))
        .route("/api/reminders/{id}/snooze", post(reminder::snooze_reminder))
        // Marketplace
        .route(
            "/api/marketplace",
            post(marketplace::create_item).get(marketplace::get_items),
        )
        .route("/api/marketplace/stats", get(marketplace::get_marketplace_stats))
        .route("/api/marketplace/user/{user_id}", get(marketplace::get_user_items))
        .route(
            "/api/marketplace/favorites/{user_id}",
            get(marketplace::get_favorites),
        )
        .route("/api/marketplace/orders", get(marketplace::get_my_orders))
        .route(
            "/api/marketplace/orders/{id}/status",
            patch(marketplace::update_order_status),
        )
        .route(
            "/api/marketplace/{id}",
            get(marketplace::get_item)
                .patch(marketplace::update_item)
                .delete(marketplace::delete_item),
        )
        .route(
            "/api/marketplace/{id}/reviews",
            post(marketplace::create_review).get(marketplace::get_reviews),
        )
        .route(
            "/api/marketplace/{id}/favorite",
            post(marketplace::add_favorite).delete(marketplace::remove_favorite),
        )
        .route("/api/marketplace/{id}/orders", post(marketplace::create_order))
        // Notifications
        .route("/api/notifications", post(notification::create_notification))
        .route(
            "/api/notifications/bulk",
            post(notification::create_bulk_notifications),
        )
        .route(
            "/api/notifications/user/{user_id}",
            get(notification::get_user_notifications),
        )
        .route(
            "/api/notifications/user/{user_id}/read-all",
            patch(notification::mark_all_as_read),
        )
        .route(
            "/api/notifications/stats/{user_id}",
            get(notification::get_notification_stats),
        )
        .route(
            "/api/notifications/preferences",
            post(notification::upsert_preference),
        )
        .route(
            "/api/notifications/preferences/{user_id}",
            get(notification::get_preferences),
        )
        .route(
            "/api/notifications/preferences/{user_id}/{notification_type}/{delivery_channel}",
            patch(notification::update_preference),
        )
        .route(
            "/api/notifications/workout-reminder/{user_id}",
            post(notification::send_workout_reminder),
        )
        .route(
            "/api/notifications/achievement/{user_id}",
            post(notification::send_achievement),
        )
        .route(
            "/api/notifications/social/{user_id}",
            post(notification::send_social),
        )
        .route(
            "/api/notifications/{id}",
            get(notification::get_notification)
                .patch(notification::update_notification)
                .delete(notification::delete_notification),
        )
        .route("/api/notifications/{id}/read", patch(notification::mark_as_read))
        // Analytics
        .route("/api/analytics", post(analytics::create_analytics))
        .route(
            "/api/analytics/user/{user_id}",
            get(analytics::get_user_analytics),
        )
        .route(
            "/api/analytics/dashboard/{user_id}",
            get(analytics::get_dashboard),
        )
        .route(
            "/api/analytics/settings",
            post(analytics::save_dashboard_settings),
        )
        .route(
            "/api/analytics/settings/{user_id}",
            get(analytics::get_dashboard_settings),
        )
        .route(
            "/api/analytics/{id}",
            get(analytics::get_analytics)
                .patch(analytics::update_analytics)
                .delete(analytics::delete_analytics),
        )
}
