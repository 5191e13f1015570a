//! The parameterized person reads.
//!
//! Both reads return rows pre-grouped into one `person` map and a list of
//! `memberships`, each holding a `membership`, an `organisation` and its
//! `roles`. Role intervals come from the `HAS_ROLE` edge; membership
//! intervals from the membership node itself. Every key may be null.

use neo4rs::query;
use people_core::PersonRecord;

use crate::client::{GraphClient, GraphError};

/// Which identity model a read goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityModel {
    /// Identifier → `IDENTIFIES` → source person → `EQUIVALENT_TO` → canonical.
    Concorded,
    /// Identifier is the `uuid` of a person node.
    Legacy,
}

/// Match the canonical node of the requested identifier's concordance group
/// and gather memberships from every source node in that group.
const CONCORDED_MATCH: &str = "
    MATCH (:UPPIdentifier {value: $id})-[:IDENTIFIES]->(:Person)-[:EQUIVALENT_TO]->(canonical:Person)
    MATCH (canonical)<-[:EQUIVALENT_TO]-(source:Person)
    OPTIONAL MATCH (source)<-[:HAS_MEMBER]-(m:Membership)
    WITH DISTINCT canonical, m, canonical.prefUUID AS personId";

const LEGACY_MATCH: &str = "
    MATCH (canonical:Person {uuid: $id})
    OPTIONAL MATCH (canonical)<-[:HAS_MEMBER]-(m:Membership)
    WITH canonical, m, canonical.uuid AS personId";

const GROUP_AND_RETURN: &str = "
    OPTIONAL MATCH (m)-[:HAS_ORGANISATION]->(o:Organisation)
    OPTIONAL MATCH (m)-[rr:HAS_ROLE]->(r:Role)
    WITH canonical, personId, m, o,
         collect({
            id: r.uuid, types: labels(r), prefLabel: r.prefLabel,
            inceptionDate: rr.inceptionDate, terminationDate: rr.terminationDate
         }) AS roles
    WITH canonical, personId,
         collect({
            membership: {
                id: m.uuid, types: labels(m), prefLabel: m.prefLabel, title: m.title,
                inceptionDate: m.inceptionDate, terminationDate: m.terminationDate
            },
            organisation: {id: o.uuid, types: labels(o), prefLabel: o.prefLabel, labels: o.aliases},
            roles: roles
         }) AS memberships
    RETURN {
        id: personId, types: labels(canonical), prefLabel: canonical.prefLabel,
        labels: canonical.aliases, salutation: canonical.salutation,
        birthYear: canonical.birthYear, emailAddress: canonical.emailAddress,
        twitterHandle: canonical.twitterHandle, facebookProfile: canonical.facebookProfile,
        linkedinProfile: canonical.linkedinProfile, description: canonical.description,
        descriptionXML: canonical.descriptionXML, imageURL: canonical.imageURL
    } AS person, memberships";

/// Full Cypher text for the given identity model.
pub fn person_query(model: IdentityModel) -> String {
    let head = match model {
        IdentityModel::Concorded => CONCORDED_MATCH,
        IdentityModel::Legacy => LEGACY_MATCH,
    };
    format!("{head}{GROUP_AND_RETURN}")
}

impl GraphClient {
    /// Run one person read and decode every returned row.
    ///
    /// More than one row means more than one canonical person matched; the
    /// caller decides what that means.
    pub async fn fetch_person_records(
        &self,
        model: IdentityModel,
        id: &str,
    ) -> Result<Vec<PersonRecord>, GraphError> {
        let q = query(&person_query(model)).param("id", id.to_string());

        let rows = self.query_rows(q).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let person = row.get("person").map_err(|e| {
                GraphError::Serialization(format!("Failed to deserialize person: {e}"))
            })?;
            let memberships = row.get("memberships").map_err(|e| {
                GraphError::Serialization(format!("Failed to deserialize memberships: {e}"))
            })?;
            records.push(PersonRecord {
                person,
                memberships,
            });
        }

        tracing::debug!(uuid = %id, ?model, rows = records.len(), "Person query returned");
        Ok(records)
    }
}
