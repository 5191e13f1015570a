//! Graph-backed implementation of [`PeopleDriver`].

use std::time::Duration;

use async_trait::async_trait;
use people_core::{project, ConnectivityStatus, PeopleDriver, Person, ReadError};

use crate::client::GraphClient;
use crate::resolver::{IdentityResolver, PersonRecordSource};

/// Resolves identity through the graph, then projects the row.
pub struct CypherDriver<S = GraphClient> {
    resolver: IdentityResolver<S>,
    env: String,
    probe_timeout: Duration,
}

impl<S: PersonRecordSource> CypherDriver<S> {
    /// `probe_timeout` must stay below the health-check framework's own limit.
    pub fn new(source: S, env: impl Into<String>, probe_timeout: Duration) -> Self {
        Self {
            resolver: IdentityResolver::new(source),
            env: env.into(),
            probe_timeout,
        }
    }
}

#[async_trait]
impl<S: PersonRecordSource> PeopleDriver for CypherDriver<S> {
    async fn read(&self, id: &str, transaction_id: &str) -> Result<Option<Person>, ReadError> {
        let record = match self.resolver.resolve(id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(uuid = %id, transaction_id = %transaction_id, "Person not found");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(
                    uuid = %id,
                    transaction_id = %transaction_id,
                    error = %e,
                    "Person read failed"
                );
                return Err(e);
            }
        };

        Ok(Some(project(&record, id, &self.env)))
    }

    async fn check_connectivity(&self) -> ConnectivityStatus {
        match tokio::time::timeout(self.probe_timeout, self.resolver.source().ping()).await {
            Ok(Ok(())) => ConnectivityStatus::ok("Connectivity to neo4j is ok"),
            Ok(Err(e)) => ConnectivityStatus::failed(format!("Error connecting to neo4j: {e}")),
            Err(_) => ConnectivityStatus::failed(format!(
                "Neo4j did not answer within {}s",
                self.probe_timeout.as_secs()
            )),
        }
    }
}
