use thiserror::Error;

/// Failure modes of a person read.
///
/// "Not found" is not an error: drivers report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Upstream timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Data integrity violation: {count} canonical people found for uuid {id}")]
    DataIntegrity { id: String, count: usize },

    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16 },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ReadError {
    /// Integrity violations are kept apart from plain I/O failures so that
    /// operators can alert on them separately.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::DataIntegrity { .. })
    }
}

impl From<serde_json::Error> for ReadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
