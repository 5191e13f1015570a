//! people-graph: Neo4j-backed person reads.
//!
//! All graph access for the people API flows through this crate. A read
//! resolves the requested identifier through the concordance model first,
//! falls back to the legacy direct match, and folds the resulting row into
//! the public Person document.

pub mod client;
pub mod driver;
pub mod queries;
pub mod resolver;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use driver::CypherDriver;
pub use queries::IdentityModel;
pub use resolver::{IdentityResolver, PersonRecordSource};
