//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! They provide type-safe representations with business logic separated from database
//! and API concerns.

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
