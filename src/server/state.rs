//! Application state shared across all request handlers.
//!
//! `AppState` is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. It holds the database connection pool
//! and the identity provider used to resolve bearer tokens.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::data::identity::IdentityProvider;

/// Application state containing shared resources and dependencies.
///
/// Both fields are cheap to clone: `DatabaseConnection` is a pool handle and the
/// identity provider sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// External identity provider that validates bearer tokens.
    ///
    /// Stored as a trait object so tests can substitute a fake provider.
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `identity` - Identity provider used by the auth guard
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { db, identity }
    }
}
