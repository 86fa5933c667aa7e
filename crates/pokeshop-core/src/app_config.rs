use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for the processes that talk to the catalog database: the HTTP
/// service, the importer, and the `db` maintenance commands.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Number of items per page on `GET /products/`. Always at least 1.
    pub page_size: u32,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("page_size", &self.page_size)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}

/// Settings for the harvester. Kept apart from [`AppConfig`] so a harvest run
/// never needs a database.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the PokéAPI v2 REST API, e.g. `https://pokeapi.co/api/v2/`.
    pub pokeapi_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
