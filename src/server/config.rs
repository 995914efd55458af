use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Application configuration loaded from environment variables.
pub struct Config {
    pub database_url: String,

    pub supabase_url: String,
    /// Service role key, falling back to the anon key when the service key is not set.
    pub supabase_api_key: String,

    pub host: String,
    pub port: u16,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// `DATABASE_URL` and `SUPABASE_URL` are required. The provider key is read from
    /// `SUPABASE_SERVICE_ROLE_KEY`, then `SUPABASE_ANON_KEY`. `HOST` and `PORT` are optional.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables were present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or `PORT` is not a number
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string(), value))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            supabase_url: std::env::var("SUPABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("SUPABASE_URL".to_string()))?,
            supabase_api_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY")
                .or_else(|_| std::env::var("SUPABASE_ANON_KEY"))
                .map_err(|_| ConfigError::MissingEnvVar("SUPABASE_ANON_KEY".to_string()))?,
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Socket address the HTTP listener binds to, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
