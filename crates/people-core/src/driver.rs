//! The read capability every backend implements.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ReadError;
use crate::model::Person;

/// Outcome of a backend connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityStatus {
    pub healthy: bool,
    pub message: String,
}

impl ConnectivityStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            healthy: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}

/// Resolves a person identifier into the public Person document.
///
/// `Ok(None)` means the identifier is unknown to the backend. The returned
/// document's `id` carries the canonical identity, which may differ from
/// the requested one when the identifier was concorded.
#[async_trait]
pub trait PeopleDriver: Send + Sync {
    async fn read(&self, id: &str, transaction_id: &str) -> Result<Option<Person>, ReadError>;

    async fn check_connectivity(&self) -> ConnectivityStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_constructors() {
        assert!(ConnectivityStatus::ok("Connectivity to neo4j is ok").healthy);
        let failed = ConnectivityStatus::failed("connection refused");
        assert!(!failed.healthy);
        assert_eq!(failed.message, "connection refused");
    }
}
