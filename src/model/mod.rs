//! Wire-level data transfer objects.
//!
//! Request and response bodies exchanged with API clients. Request DTOs derive
//! `validator::Validate` and are checked by the `ValidatedJson` extractor before any
//! service call. Response DTOs are produced by `into_dto` on the server domain models.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod challenge;
pub mod comment;
pub mod group;
pub mod health_log;
pub mod marketplace;
pub mod notification;
pub mod post;
pub mod reminder;
pub mod role;
pub mod user;
