//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Handling complex multi-step operations

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

#[cfg(test)]
mod test;
