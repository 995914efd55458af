//! Server-side API backend and business logic.
//!
//! This module contains the complete backend for the wellness application: the REST
//! endpoints for users, posts, comments, groups, challenges, health logs, reminders,
//! marketplace listings, notifications and analytics, together with the business rules
//! and data access behind them. The backend uses Axum as the web framework and SeaORM
//! for database operations. Caller identity is delegated to an external identity provider.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business rules: existence checks, ownership, uniqueness, counters
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Bearer-token authentication guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB pool, identity provider)
//! - **Startup** (`startup`) - Initialization of the database, HTTP client and identity provider
//! - **Router** (`router`) - Axum route configuration
//! - **Utilities** (`util/`) - Pagination, request validation and text search helpers
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Extractors** deserialize and validate the body, rejecting malformed input with 400
//! 3. **Middleware** resolves the caller from the bearer token when the endpoint requires it
//! 4. **Controller** converts DTOs to params and calls the service with the caller's id
//! 5. **Service** loads related rows, enforces ownership and state rules, persists changes
//! 6. **Data** queries database, converts entities to domain models
//! 7. **Controller** converts domain model to DTO, returns HTTP response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
