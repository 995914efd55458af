use std::{sync::Arc, time::Duration};

use crate::server::{
    config::Config,
    data::identity::{IdentityProvider, SupabaseIdentityProvider},
    error::AppError,
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// automatically runs all pending SeaORM migrations to ensure the database schema is
/// up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for identity provider calls.
///
/// Redirects are disabled so a misconfigured provider URL cannot bounce bearer tokens
/// to another host.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend failed to initialize
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(10))
        .build()?;

    Ok(client)
}

/// Creates the production identity provider backed by Supabase Auth.
///
/// # Arguments
/// - `config` - Application configuration holding the Supabase URL and API key
/// - `http_client` - Client used for token lookups
///
/// # Returns
/// - `Ok(Arc<dyn IdentityProvider>)` - Provider ready to be stored in `AppState`
/// - `Err(AppError::ConfigErr)` - `SUPABASE_URL` is not a valid URL
pub fn setup_identity_provider(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<Arc<dyn IdentityProvider>, AppError> {
    let provider = SupabaseIdentityProvider::new(
        http_client,
        &config.supabase_url,
        config.supabase_api_key.clone(),
    )?;

    Ok(Arc::new(provider))
}
