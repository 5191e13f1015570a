//! Folding grouped graph rows into one Person document.
//!
//! Membership groups are all-or-nothing: a group is only materialised when
//! it has a membership id, an organisation id and at least one role with an
//! id. A half-hydrated membership (organisation deleted, role still linked)
//! is dropped rather than exposed.
//!
//! Membership and role order follows the query result and is not stable.

use crate::change_event::change_events;
use crate::model::{Membership, Organisation, Person, Role, Thing};
use crate::ontology::{api_url, id_url, most_specific_type, type_uris};
use crate::rows::{MembershipGroup, OrganisationRow, PersonRecord, RoleRow};

/// Build the Person document for `record`.
///
/// Never fails: a record without a person id still yields a document whose
/// identity is minted from `requested_id`. Deciding "not found" is the
/// driver's job.
pub fn project(record: &PersonRecord, requested_id: &str, env: &str) -> Person {
    let row = &record.person;
    let uuid = non_empty(&row.id).unwrap_or(requested_id);
    let labels = row.types.as_deref().unwrap_or_default();

    let memberships: Vec<Membership> = record
        .memberships
        .iter()
        .filter_map(|group| project_membership(group, env))
        .collect();

    tracing::debug!(
        uuid = %uuid,
        groups = record.memberships.len(),
        memberships = memberships.len(),
        "Projected person record"
    );

    Person {
        base: Thing {
            id: id_url(uuid),
            api_url: api_url(uuid, labels, env),
            pref_label: owned(&row.pref_label),
        },
        types: type_uris(labels),
        direct_type: most_specific_type(labels),
        labels: row.labels.clone().unwrap_or_default(),
        memberships,
        salutation: owned(&row.salutation),
        birth_year: row.birth_year.filter(|y| *y != 0),
        email_address: owned(&row.email_address),
        twitter_handle: owned(&row.twitter_handle),
        facebook_profile: owned(&row.facebook_profile),
        linkedin_profile: owned(&row.linkedin_profile),
        description: owned(&row.description),
        description_xml: owned(&row.description_xml),
        image_url: owned(&row.image_url),
    }
}

fn project_membership(group: &MembershipGroup, env: &str) -> Option<Membership> {
    let m = &group.membership;
    let membership_id = non_empty(&m.id)?;
    let Some(organisation) = project_organisation(&group.organisation, env) else {
        tracing::debug!(membership = %membership_id, "Dropping membership without organisation");
        return None;
    };

    let roles: Vec<Role> = group
        .roles
        .iter()
        .filter_map(|r| project_role(r, env))
        .collect();
    if roles.is_empty() {
        tracing::debug!(membership = %membership_id, "Dropping membership without roles");
        return None;
    }

    let labels = m.types.as_deref().unwrap_or_default();
    Some(Membership {
        title: owned(&m.pref_label).or_else(|| owned(&m.title)),
        types: type_uris(labels),
        direct_type: most_specific_type(labels),
        organisation,
        change_events: change_events(m.inception_date.as_deref(), m.termination_date.as_deref()),
        roles,
    })
}

fn project_organisation(row: &OrganisationRow, env: &str) -> Option<Organisation> {
    let uuid = non_empty(&row.id)?;
    let labels = row.types.as_deref().unwrap_or_default();
    Some(Organisation {
        base: Thing {
            id: id_url(uuid),
            api_url: api_url(uuid, labels, env),
            pref_label: owned(&row.pref_label),
        },
        types: type_uris(labels),
        direct_type: most_specific_type(labels),
        labels: row.labels.clone().unwrap_or_default(),
    })
}

fn project_role(row: &RoleRow, env: &str) -> Option<Role> {
    let uuid = non_empty(&row.id)?;
    let labels = row.types.as_deref().unwrap_or_default();
    Some(Role {
        base: Thing {
            id: id_url(uuid),
            api_url: api_url(uuid, labels, env),
            pref_label: owned(&row.pref_label),
        },
        types: type_uris(labels),
        direct_type: most_specific_type(labels),
        change_events: change_events(
            row.inception_date.as_deref(),
            row.termination_date.as_deref(),
        ),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn owned(value: &Option<String>) -> Option<String> {
    non_empty(value).map(str::to_string)
}
