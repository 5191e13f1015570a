//! people-core: the Person document and the projection that builds it.
//!
//! This crate holds everything about the public people API that does not
//! touch a network socket:
//! - The output document model (Person, Membership, Organisation, Role)
//! - Ontology type URIs and API URL minting
//! - Change-event merging for relationship intervals
//! - Folding grouped graph rows into one Person document
//! - Converting concepts-service documents into the same shape
//! - The `PeopleDriver` capability and its error taxonomy

pub mod change_event;
pub mod concept;
pub mod driver;
pub mod error;
pub mod model;
pub mod ontology;
pub mod projection;
pub mod rows;

pub use driver::{ConnectivityStatus, PeopleDriver};
pub use error::ReadError;
pub use model::{ChangeEvent, HasIdentity, Membership, Organisation, Person, Role, Thing};
pub use projection::project;
pub use rows::PersonRecord;
