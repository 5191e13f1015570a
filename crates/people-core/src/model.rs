//! The public Person document.
//!
//! Every entity is a value built fresh per request. Optional fields are
//! omitted from the serialized form rather than emitted as null or empty.

use serde::{Deserialize, Serialize};

// ── Identity ──────────────────────────────────────────────────────

/// Minimal identity shared by every entity in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thing {
    pub id: String,
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<String>,
}

/// Anything that carries a [`Thing`] identity.
pub trait HasIdentity {
    fn thing(&self) -> &Thing;

    fn id(&self) -> &str {
        &self.thing().id
    }

    fn api_url(&self) -> &str {
        &self.thing().api_url
    }

    fn pref_label(&self) -> Option<&str> {
        self.thing().pref_label.as_deref()
    }
}

impl HasIdentity for Thing {
    fn thing(&self) -> &Thing {
        self
    }
}

// ── Entities ──────────────────────────────────────────────────────

/// A person and everything known about their organisational memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(flatten)]
    pub base: Thing,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "descriptionXML",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description_xml: Option<String>,
    #[serde(rename = "_imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl HasIdentity for Person {
    fn thing(&self) -> &Thing {
        &self.base
    }
}

/// A person's relationship to an organisation, with the roles held there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_type: Option<String>,
    pub organisation: Organisation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub change_events: Vec<ChangeEvent>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    #[serde(flatten)]
    pub base: Thing,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl HasIdentity for Organisation {
    fn thing(&self) -> &Thing {
        &self.base
    }
}

/// The capacity in which a person serves an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(flatten)]
    pub base: Thing,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub change_events: Vec<ChangeEvent>,
}

impl HasIdentity for Role {
    fn thing(&self) -> &Thing {
        &self.base
    }
}

/// When a relationship started and/or ended. At least one side is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_person_keeps_mandatory_fields() {
        let person = Person {
            base: Thing {
                id: "http://api.ft.com/things/".to_string(),
                api_url: "http://api.ft.com/things/".to_string(),
                pref_label: None,
            },
            ..Default::default()
        };

        let json = serde_json::to_string(&person).unwrap();
        assert_eq!(
            json,
            r#"{"id":"http://api.ft.com/things/","apiUrl":"http://api.ft.com/things/","types":[],"memberships":[]}"#
        );
    }

    #[test]
    fn test_optional_fields_use_wire_names() {
        let person = Person {
            base: Thing {
                id: "i".to_string(),
                api_url: "a".to_string(),
                pref_label: Some("Siobhan Morden".to_string()),
            },
            birth_year: Some(1974),
            description_xml: Some("Some text containing <strong>markup</strong>".to_string()),
            image_url: Some("http://someimage.jpg".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value["prefLabel"], "Siobhan Morden");
        assert_eq!(value["birthYear"], 1974);
        assert_eq!(
            value["descriptionXML"],
            "Some text containing <strong>markup</strong>"
        );
        assert_eq!(value["_imageUrl"], "http://someimage.jpg");
        assert!(value.get("labels").is_none());
        assert!(value.get("salutation").is_none());
    }

    #[test]
    fn test_change_event_omits_empty_side() {
        let event = ChangeEvent {
            started_at: Some("1979-01-01".to_string()),
            ended_at: None,
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"startedAt":"1979-01-01"}"#
        );
    }

    #[test]
    fn test_identity_accessors() {
        let role = Role {
            base: Thing {
                id: "http://api.ft.com/things/r1".to_string(),
                api_url: "http://api.ft.com/things/r1".to_string(),
                pref_label: Some("Market Strategist".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(role.id(), "http://api.ft.com/things/r1");
        assert_eq!(role.pref_label(), Some("Market Strategist"));
    }

    #[test]
    fn test_person_document_deserializes() {
        let json = r#"{
            "id": "http://api.ft.com/things/p1",
            "apiUrl": "http://api.ft.com/people/p1",
            "prefLabel": "Neil Cole",
            "types": ["http://www.ft.com/ontology/person/Person"],
            "memberships": []
        }"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.id(), "http://api.ft.com/things/p1");
        assert_eq!(person.pref_label(), Some("Neil Cole"));
        assert!(person.memberships.is_empty());
    }
}
