use crate::auth::jwt::JwtConfig;
use crate::auth::password::HashCost;

/// Credentials for an admin author created at startup when absent.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub name: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. `None` runs the server on the in-memory store.
    pub database_url: Option<String>,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Argon2id cost for new password hashes.
    pub password_hash: HashCost,
    /// Seed demo authors and articles into an empty article store.
    pub seed_demo_data: bool,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `DATABASE_URL`             | unset (in-memory store) |
    /// | `SEED_DEMO_DATA`           | `false`                 |
    /// | `BOOTSTRAP_ADMIN_NAME`     | unset                   |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                   |
    ///
    /// JWT and password-hash settings are documented on [`JwtConfig::from_env`]
    /// and [`HashCost::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let seed_demo_data: bool = std::env::var("SEED_DEMO_DATA")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SEED_DEMO_DATA must be true or false");

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_NAME"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(name), Ok(password)) => Some(BootstrapAdmin { name, password }),
            (Ok(_), Err(_)) => panic!("BOOTSTRAP_ADMIN_NAME requires BOOTSTRAP_ADMIN_PASSWORD"),
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt: JwtConfig::from_env(),
            password_hash: HashCost::from_env(),
            seed_demo_data,
            bootstrap_admin,
        }
    }
}
