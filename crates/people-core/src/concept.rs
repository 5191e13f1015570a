//! Conversion of concepts-service documents into the Person shape.
//!
//! Newer deployments read people from the concepts resolution service
//! instead of the graph. Its documents are flat: a person with
//! `relatedConcepts` edges to memberships, which in turn relate to an
//! organisation and roles. Related concepts are classified by a substring
//! match on their declared type (`Organisation`, `Role`).

use serde::{Deserialize, Deserializer};

use crate::change_event::{change_events, merge_change_event};
use crate::model::{ChangeEvent, Membership, Organisation, Person, Role, Thing};
use crate::ontology::{api_url_for_type, full_type_hierarchy, id_url, uuid_from_uri, OntologyType};

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A concept as served by the concepts service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Concept {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub api_url: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub concept_type: String,
    #[serde(deserialize_with = "nullable")]
    pub pref_label: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(rename = "descriptionXML", deserialize_with = "nullable")]
    pub description_xml: String,
    #[serde(rename = "imageURL", deserialize_with = "nullable")]
    pub image_url: String,
    #[serde(deserialize_with = "nullable")]
    pub alternative_labels: Vec<TypedValue>,
    #[serde(deserialize_with = "nullable")]
    pub account: Vec<TypedValue>,
    #[serde(deserialize_with = "nullable")]
    pub salutation: String,
    pub birth_year: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub related_concepts: Vec<RelatedConcept>,
    #[serde(deserialize_with = "nullable")]
    pub change_events: Vec<ChangeEvent>,
    #[serde(deserialize_with = "nullable")]
    pub inception_date: String,
    #[serde(deserialize_with = "nullable")]
    pub termination_date: String,
}

/// A `{type, value}` pair (aliases, social accounts).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypedValue {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub value_type: String,
    pub value: serde_json::Value,
}

impl TypedValue {
    fn text(&self) -> Option<String> {
        self.value
            .as_str()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelatedConcept {
    pub concept: Concept,
    #[serde(deserialize_with = "nullable")]
    pub predicate: String,
}

impl Concept {
    /// Only Person concepts are served; anything else reads as absent.
    pub fn is_person(&self) -> bool {
        self.concept_type == OntologyType::Person.uri()
    }

    fn uuid(&self) -> &str {
        uuid_from_uri(&self.id)
    }

    fn thing(&self, env: &str) -> Thing {
        let uuid = self.uuid();
        Thing {
            id: id_url(uuid),
            api_url: api_url_for_type(uuid, &self.concept_type, env),
            pref_label: non_empty(&self.pref_label),
        }
    }

    fn direct_type(&self) -> Option<String> {
        non_empty(&self.concept_type)
    }

    fn aliases(&self) -> Vec<String> {
        self.alternative_labels
            .iter()
            .filter_map(TypedValue::text)
            .collect()
    }

    fn change_events(&self) -> Vec<ChangeEvent> {
        if !self.change_events.is_empty() {
            return self
                .change_events
                .iter()
                .filter_map(|e| {
                    merge_change_event(e.started_at.as_deref(), e.ended_at.as_deref())
                })
                .collect();
        }
        change_events(Some(&self.inception_date), Some(&self.termination_date))
    }
}

/// Convert a person concept into the public document.
///
/// Membership candidates follow the same all-or-nothing rule as graph rows:
/// no membership id, no organisation or no role means no membership.
pub fn convert_to_person(concept: &Concept, env: &str) -> Person {
    let mut person = Person {
        base: concept.thing(env),
        types: full_type_hierarchy(&concept.concept_type),
        direct_type: concept.direct_type(),
        labels: concept.aliases(),
        memberships: concept
            .related_concepts
            .iter()
            .filter_map(|related| convert_membership(&related.concept, env))
            .collect(),
        salutation: non_empty(&concept.salutation),
        birth_year: concept.birth_year.filter(|y| *y != 0),
        description: non_empty(&concept.description),
        description_xml: non_empty(&concept.description_xml),
        image_url: non_empty(&concept.image_url),
        ..Default::default()
    };

    for account in &concept.account {
        let value = account.text();
        let kind = account.value_type.as_str();
        if kind.contains("facebookProfile") {
            person.facebook_profile = value;
        } else if kind.contains("twitterHandle") {
            person.twitter_handle = value;
        } else if kind.contains("emailAddress") {
            person.email_address = value;
        } else if kind.contains("linkedinProfile") {
            person.linkedin_profile = value;
        }
    }

    person
}

fn convert_membership(concept: &Concept, env: &str) -> Option<Membership> {
    if concept.uuid().is_empty() {
        return None;
    }

    let organisation = concept
        .related_concepts
        .iter()
        .map(|r| &r.concept)
        .find(|c| c.concept_type.contains("Organisation") && !c.uuid().is_empty())
        .map(|c| convert_organisation(c, env))?;

    let roles: Vec<Role> = concept
        .related_concepts
        .iter()
        .map(|r| &r.concept)
        .filter(|c| c.concept_type.contains("Role") && !c.uuid().is_empty())
        .map(|c| convert_role(c, env))
        .collect();
    if roles.is_empty() {
        tracing::debug!(membership = %concept.id, "Dropping membership without roles");
        return None;
    }

    Some(Membership {
        title: non_empty(&concept.pref_label),
        types: full_type_hierarchy(&concept.concept_type),
        direct_type: concept.direct_type(),
        organisation,
        change_events: concept.change_events(),
        roles,
    })
}

fn convert_organisation(concept: &Concept, env: &str) -> Organisation {
    Organisation {
        base: concept.thing(env),
        types: full_type_hierarchy(&concept.concept_type),
        direct_type: concept.direct_type(),
        labels: concept.aliases(),
    }
}

fn convert_role(concept: &Concept, env: &str) -> Role {
    Role {
        base: concept.thing(env),
        types: full_type_hierarchy(&concept.concept_type),
        direct_type: concept.direct_type(),
        change_events: concept.change_events(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
