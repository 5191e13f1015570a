//! Raw row shapes returned by the person graph queries.
//!
//! The queries pre-group their result into one person map plus a list of
//! membership groups. Any field may come back null from an `OPTIONAL MATCH`,
//! so everything here is optional and defaulted.

use serde::Deserialize;

/// One query row: a person and its membership groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonRecord {
    #[serde(default)]
    pub person: PersonRow,
    #[serde(default)]
    pub memberships: Vec<MembershipGroup>,
}

impl PersonRecord {
    /// Whether the person map carries an identifier at all.
    pub fn is_populated(&self) -> bool {
        self.person
            .id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonRow {
    pub id: Option<String>,
    pub types: Option<Vec<String>>,
    pub pref_label: Option<String>,
    pub labels: Option<Vec<String>>,
    pub salutation: Option<String>,
    pub birth_year: Option<i64>,
    pub email_address: Option<String>,
    pub twitter_handle: Option<String>,
    pub facebook_profile: Option<String>,
    pub linkedin_profile: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "descriptionXML")]
    pub description_xml: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
}

/// A membership with the organisation and roles hanging off it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MembershipGroup {
    pub membership: MembershipRow,
    pub organisation: OrganisationRow,
    pub roles: Vec<RoleRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MembershipRow {
    pub id: Option<String>,
    pub types: Option<Vec<String>>,
    pub pref_label: Option<String>,
    pub title: Option<String>,
    pub inception_date: Option<String>,
    pub termination_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganisationRow {
    pub id: Option<String>,
    pub types: Option<Vec<String>>,
    pub pref_label: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// A role plus the dates stored on the `HAS_ROLE` edge that reached it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleRow {
    pub id: Option<String>,
    pub types: Option<Vec<String>>,
    pub pref_label: Option<String>,
    pub inception_date: Option<String>,
    pub termination_date: Option<String>,
}
