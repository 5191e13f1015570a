//! Neo4j connection management and shared graph client.

use std::time::Duration;

use neo4rs::{ConfigBuilder, Graph, Query};
use people_core::ReadError;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Neo4j query timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<GraphError> for ReadError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::Connection(msg) => ReadError::Connection(msg),
            GraphError::Query(e) => ReadError::Query(e.to_string()),
            GraphError::Timeout { seconds } => ReadError::Timeout { seconds },
            GraphError::Serialization(msg) => ReadError::Decode(msg),
        }
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
    /// Upper bound on a single read, so a stalled query surfaces as an error.
    pub query_timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neo4j".to_string(),
            max_connections: 16,
            fetch_size: 256,
            query_timeout: Duration::from_secs(60),
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// The pool is the only state shared between requests. Clone is cheap
/// (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    query_timeout: Duration,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self {
            graph,
            query_timeout: config.query_timeout,
        })
    }

    /// Execute a write-only query (CREATE, MERGE, DELETE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a read query and collect all rows, bounded by the query timeout.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let fetch = async {
            let mut stream = self.graph.execute(query).await?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next().await? {
                rows.push(row);
            }
            Ok::<_, GraphError>(rows)
        };

        tokio::time::timeout(self.query_timeout, fetch)
            .await
            .map_err(|_| GraphError::Timeout {
                seconds: self.query_timeout.as_secs(),
            })?
    }

    /// Trivial round trip used by health checks.
    pub async fn ping(&self) -> Result<(), GraphError> {
        let mut stream = self.graph.execute(neo4rs::query("RETURN 1 AS n")).await?;
        match stream.next().await? {
            Some(_) => Ok(()),
            None => Err(GraphError::Connection(
                "Empty response to connectivity probe".to_string(),
            )),
        }
    }
}
