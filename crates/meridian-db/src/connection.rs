//! SurrealDB connection management.

use meridian_core::error::{CrmError, CrmResult};
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Environment variables supplying the database connection settings.
/// All five are required; presence is validated at startup.
pub const ENV_DB_URL: &str = "MERIDIAN_DB_URL";
pub const ENV_DB_NS: &str = "MERIDIAN_DB_NS";
pub const ENV_DB_NAME: &str = "MERIDIAN_DB_NAME";
pub const ENV_DB_USER: &str = "MERIDIAN_DB_USER";
pub const ENV_DB_PASS: &str = "MERIDIAN_DB_PASS";

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl DbConfig {
    /// Load the connection settings from the process environment. Any
    /// missing key is a fatal configuration error.
    pub fn from_env() -> CrmResult<Self> {
        Ok(Self {
            url: require_env(ENV_DB_URL)?,
            namespace: require_env(ENV_DB_NS)?,
            database: require_env(ENV_DB_NAME)?,
            username: require_env(ENV_DB_USER)?,
            password: require_env(ENV_DB_PASS)?,
        })
    }
}

fn require_env(key: &str) -> CrmResult<String> {
    std::env::var(key)
        .map_err(|_| CrmError::Config(format!("missing required environment variable {key}")))
}

/// Manages a connection to SurrealDB.
///
/// Constructed once at startup and handed to each repository; there is
/// no process-wide connection state.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root, selects the configured namespace and
    /// database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
