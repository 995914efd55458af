//! HTTP request handlers.
//!
//! Controllers authenticate the caller through `AuthGuard`, convert request DTOs into
//! service parameters and map domain models back to response DTOs. Business rules live
//! in the service layer.

pub mod analytics;
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
