//! Configuration for the people API service.

use std::time::Duration;

use people_graph::GraphConfig;
use serde::Deserialize;

/// Top-level service configuration.
///
/// Loaded from `people.toml` (or the prefix given with `--config`) and
/// `PEOPLE__` environment variables, e.g. `PEOPLE__NEO4J__URI`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// System code reported by the health endpoint.
    #[serde(default = "default_system_code")]
    pub app_system_code: String,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment. `test` switches minted API URLs to the test host.
    #[serde(default = "default_env")]
    pub env: String,

    /// Default tracing directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_cache_duration")]
    pub cache_duration_secs: u64,

    #[serde(default = "default_true")]
    pub request_logging_enabled: bool,

    /// Where people are read from.
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_concepts_api_url")]
    pub concepts_api_url: String,

    /// Bound on a single upstream read (graph query or concepts call).
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_secs: u64,

    /// Bound on a connectivity probe. Must stay below the 10s health budget.
    #[serde(default = "default_health_check_timeout")]
    pub health_check_timeout_secs: u64,

    #[serde(default)]
    pub neo4j: Neo4jConfig,
}

/// Connection settings for the graph backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    #[serde(default = "default_neo4j_uri")]
    pub uri: String,

    #[serde(default = "default_neo4j_user")]
    pub user: String,

    #[serde(default = "default_neo4j_password")]
    pub password: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// Selectable read backends.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Query Neo4j directly.
    #[default]
    Neo4j,
    /// Call the concepts resolution service.
    Concepts,
}

impl ApiConfig {
    /// Load from an optional `<prefix>.toml` file plus `PEOPLE__*` variables.
    pub fn load(file_prefix: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("PEOPLE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn health_check_timeout(&self) -> Duration {
        Duration::from_secs(self.health_check_timeout_secs)
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.neo4j.uri.clone(),
            user: self.neo4j.user.clone(),
            password: self.neo4j.password.clone(),
            max_connections: self.neo4j.max_connections,
            fetch_size: self.neo4j.fetch_size,
            query_timeout: self.upstream_timeout(),
        }
    }
}

fn default_system_code() -> String {
    "public-people-api".to_string()
}

fn default_app_name() -> String {
    "Public People API".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_env() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cache_duration() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_concepts_api_url() -> String {
    "http://localhost:8080/concepts".to_string()
}

fn default_upstream_timeout() -> u64 {
    60
}

fn default_health_check_timeout() -> u64 {
    5
}

fn default_neo4j_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_neo4j_user() -> String {
    "neo4j".to_string()
}

fn default_neo4j_password() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_neo4j_uri(),
            user: default_neo4j_user(),
            password: default_neo4j_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            app_system_code: default_system_code(),
            app_name: default_app_name(),
            port: default_port(),
            env: default_env(),
            log_level: default_log_level(),
            cache_duration_secs: default_cache_duration(),
            request_logging_enabled: true,
            backend: Backend::default(),
            concepts_api_url: default_concepts_api_url(),
            upstream_timeout_secs: default_upstream_timeout(),
            health_check_timeout_secs: default_health_check_timeout(),
            neo4j: Neo4jConfig::default(),
        }
    }
}
