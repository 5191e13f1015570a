//! Identity and concordance resolution.

use async_trait::async_trait;
use people_core::{PersonRecord, ReadError};

use crate::client::{GraphClient, GraphError};
use crate::queries::IdentityModel;

/// Anything that can run the person reads.
#[async_trait]
pub trait PersonRecordSource: Send + Sync {
    async fn fetch(&self, model: IdentityModel, id: &str)
        -> Result<Vec<PersonRecord>, GraphError>;

    async fn ping(&self) -> Result<(), GraphError>;
}

#[async_trait]
impl PersonRecordSource for GraphClient {
    async fn fetch(
        &self,
        model: IdentityModel,
        id: &str,
    ) -> Result<Vec<PersonRecord>, GraphError> {
        self.fetch_person_records(model, id).await
    }

    async fn ping(&self) -> Result<(), GraphError> {
        GraphClient::ping(self).await
    }
}

/// Two-tier lookup: the concordance model, then the legacy direct match.
///
/// A concorded row is only taken when its person map is populated. Zero rows
/// on both paths is "not found". More than one row on either path is a
/// data-integrity violation and is never resolved by picking one.
pub struct IdentityResolver<S> {
    source: S,
}

impl<S: PersonRecordSource> IdentityResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve(&self, id: &str) -> Result<Option<PersonRecord>, ReadError> {
        let concorded = self.source.fetch(IdentityModel::Concorded, id).await?;
        if let Some(record) = single(id, concorded)? {
            if record.is_populated() {
                return Ok(Some(record));
            }
        }

        let legacy = self.source.fetch(IdentityModel::Legacy, id).await?;
        single(id, legacy)
    }
}

fn single(id: &str, mut records: Vec<PersonRecord>) -> Result<Option<PersonRecord>, ReadError> {
    match records.len() {
        0 | 1 => Ok(records.pop()),
        count => {
            tracing::error!(uuid = %id, count, "Multiple canonical people found for one uuid");
            Err(ReadError::DataIntegrity {
                id: id.to_string(),
                count,
            })
        }
    }
}
