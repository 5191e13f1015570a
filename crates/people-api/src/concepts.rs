//! [`PeopleDriver`] backed by the concepts resolution service.

use std::time::Duration;

use async_trait::async_trait;
use people_core::concept::{convert_to_person, Concept};
use people_core::{ConnectivityStatus, PeopleDriver, Person, ReadError};
use reqwest::{StatusCode, Url};

/// Reads `GET {base_url}/{uuid}` and converts the concept document.
pub struct ConceptsDriver {
    client: reqwest::Client,
    base_url: String,
    env: String,
    timeout: Duration,
    probe_timeout: Duration,
}

impl ConceptsDriver {
    pub fn new(
        base_url: impl Into<String>,
        env: impl Into<String>,
        timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self, ReadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ReadError::Connection(format!("Failed to create client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            env: env.into(),
            timeout,
            probe_timeout,
        })
    }

    fn concept_url(&self, uuid: &str) -> String {
        format!("{}/{uuid}", self.base_url)
    }

    /// The service's good-to-go endpoint lives at the host root.
    fn gtg_url(&self) -> Result<Url, String> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join("/__gtg"))
            .map_err(|e| format!("Invalid concepts API url {}: {e}", self.base_url))
    }

    fn send_error(&self, e: reqwest::Error) -> ReadError {
        if e.is_timeout() {
            ReadError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            ReadError::Connection(e.to_string())
        }
    }
}

#[async_trait]
impl PeopleDriver for ConceptsDriver {
    async fn read(&self, id: &str, transaction_id: &str) -> Result<Option<Person>, ReadError> {
        let response = self
            .client
            .get(self.concept_url(id))
            .header("X-Request-Id", transaction_id)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(uuid = %id, transaction_id = %transaction_id, "Concept not found");
            return Ok(None);
        }
        if !status.is_success() {
            tracing::error!(
                uuid = %id,
                transaction_id = %transaction_id,
                status = status.as_u16(),
                "Concepts API returned an error"
            );
            return Err(ReadError::Upstream {
                status: status.as_u16(),
            });
        }

        let concept: Concept = response.json().await.map_err(|e| {
            if e.is_decode() {
                ReadError::Decode(e.to_string())
            } else {
                self.send_error(e)
            }
        })?;
        if !concept.is_person() {
            tracing::debug!(
                uuid = %id,
                concept_type = %concept.concept_type,
                "Concept is not a person"
            );
            return Ok(None);
        }

        Ok(Some(convert_to_person(&concept, &self.env)))
    }

    async fn check_connectivity(&self) -> ConnectivityStatus {
        let url = match self.gtg_url() {
            Ok(url) => url,
            Err(message) => return ConnectivityStatus::failed(message),
        };

        match self
            .client
            .get(url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(r) if r.status().is_success() => {
                ConnectivityStatus::ok("Connectivity to the concepts API is ok")
            }
            Ok(r) => ConnectivityStatus::failed(format!(
                "Concepts API is not good to go: HTTP {}",
                r.status().as_u16()
            )),
            Err(e) => {
                ConnectivityStatus::failed(format!("Error connecting to the concepts API: {e}"))
            }
        }
    }
}
