//! Ontology type URIs and URI minting for graph entities.
//!
//! Node labels in the graph are bare strings (`Person`, `PublicCompany`, ...).
//! The public document exposes them as fully qualified ontology URIs ordered
//! from the most general type to the most specific one.

/// Root of canonical thing identifiers.
pub const THING_ID_BASE: &str = "http://api.ft.com/things/";

const PROD_API_BASE: &str = "http://api.ft.com/";
const TEST_API_BASE: &str = "http://test.api.ft.com/";

/// The label vocabulary this API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OntologyType {
    Thing,
    Concept,
    Person,
    Organisation,
    Company,
    PublicCompany,
    PrivateCompany,
    Role,
    MembershipRole,
    Membership,
}

impl OntologyType {
    /// Every known type, in a stable order used to break depth ties.
    pub const ALL: [OntologyType; 10] = [
        Self::Thing,
        Self::Concept,
        Self::Person,
        Self::Organisation,
        Self::Company,
        Self::PublicCompany,
        Self::PrivateCompany,
        Self::Role,
        Self::MembershipRole,
        Self::Membership,
    ];

    /// Map a raw node label to a known type.
    ///
    /// Labels outside the vocabulary (`UPPIdentifier`, `Curation`, labels
    /// added by newer ingesters) yield `None` and are skipped by callers, so
    /// an unexpected label never fails a read.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Thing" => Some(Self::Thing),
            "Concept" => Some(Self::Concept),
            "Person" => Some(Self::Person),
            "Organisation" => Some(Self::Organisation),
            "Company" => Some(Self::Company),
            "PublicCompany" => Some(Self::PublicCompany),
            "PrivateCompany" => Some(Self::PrivateCompany),
            "Role" => Some(Self::Role),
            "MembershipRole" => Some(Self::MembershipRole),
            "Membership" => Some(Self::Membership),
            _ => None,
        }
    }

    /// Reverse lookup from a fully qualified type URI.
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.uri() == uri)
    }

    /// The graph label this type is stored under.
    pub fn label(self) -> &'static str {
        match self {
            Self::Thing => "Thing",
            Self::Concept => "Concept",
            Self::Person => "Person",
            Self::Organisation => "Organisation",
            Self::Company => "Company",
            Self::PublicCompany => "PublicCompany",
            Self::PrivateCompany => "PrivateCompany",
            Self::Role => "Role",
            Self::MembershipRole => "MembershipRole",
            Self::Membership => "Membership",
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            Self::Thing => "http://www.ft.com/ontology/core/Thing",
            Self::Concept => "http://www.ft.com/ontology/concept/Concept",
            Self::Person => "http://www.ft.com/ontology/person/Person",
            Self::Organisation => "http://www.ft.com/ontology/organisation/Organisation",
            Self::Company => "http://www.ft.com/ontology/company/Company",
            Self::PublicCompany => "http://www.ft.com/ontology/company/PublicCompany",
            Self::PrivateCompany => "http://www.ft.com/ontology/company/PrivateCompany",
            Self::Role => "http://www.ft.com/ontology/organisation/Role",
            Self::MembershipRole => "http://www.ft.com/ontology/MembershipRole",
            Self::Membership => "http://www.ft.com/ontology/organisation/Membership",
        }
    }

    pub fn parent(self) -> Option<Self> {
        match self {
            Self::Thing => None,
            Self::Concept => Some(Self::Thing),
            Self::Person
            | Self::Organisation
            | Self::Role
            | Self::MembershipRole
            | Self::Membership => Some(Self::Concept),
            Self::Company => Some(Self::Organisation),
            Self::PublicCompany | Self::PrivateCompany => Some(Self::Company),
        }
    }

    /// Distance from `Thing`.
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    fn rank(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(usize::MAX)
    }

    fn api_path(self) -> Option<&'static str> {
        match self {
            Self::Person => Some("people"),
            Self::Organisation => Some("organisations"),
            _ => None,
        }
    }
}

fn recognised<I, S>(labels: I) -> Vec<OntologyType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut types: Vec<OntologyType> = labels
        .into_iter()
        .filter_map(|l| OntologyType::from_label(l.as_ref()))
        .collect();
    types.sort_by_key(|t| (t.depth(), t.rank()));
    types.dedup();
    types
}

/// Map raw node labels to ontology URIs, most general first.
pub fn type_uris<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    recognised(labels)
        .into_iter()
        .map(|t| t.uri().to_string())
        .collect()
}

/// The deepest recognised type among `labels`, if any.
pub fn most_specific<I, S>(labels: I) -> Option<OntologyType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    recognised(labels).pop()
}

/// URI of the deepest recognised type, used for `directType`.
///
/// Returns `None` rather than failing when nothing is recognised.
pub fn most_specific_type<I, S>(labels: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    most_specific(labels).map(|t| t.uri().to_string())
}

/// Root-to-leaf chain of URIs for a single direct type URI.
///
/// Unknown URIs produce an empty hierarchy.
pub fn full_type_hierarchy(type_uri: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = OntologyType::from_uri(type_uri);
    while let Some(t) = current {
        chain.push(t.uri().to_string());
        current = t.parent();
    }
    chain.reverse();
    chain
}

/// Canonical identifier URI for a uuid.
pub fn id_url(uuid: &str) -> String {
    format!("{THING_ID_BASE}{uuid}")
}

/// Resource URL for a uuid, typed by its most specific known label.
pub fn api_url<I, S>(uuid: &str, labels: I, env: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let base = if env == "test" {
        TEST_API_BASE
    } else {
        PROD_API_BASE
    };

    let mut path = None;
    let mut current = most_specific(labels);
    while let Some(t) = current {
        path = t.api_path();
        if path.is_some() {
            break;
        }
        current = t.parent();
    }

    format!("{base}{}/{uuid}", path.unwrap_or("things"))
}

/// Same as [`api_url`] but typed from a direct type URI.
pub fn api_url_for_type(uuid: &str, type_uri: &str, env: &str) -> String {
    api_url(uuid, OntologyType::from_uri(type_uri).map(OntologyType::label), env)
}

/// Last path segment of a URI, i.e. the uuid of `http://.../things/<uuid>`.
pub fn uuid_from_uri(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_labels_ordered_general_to_specific() {
        let uris = type_uris(["PublicCompany", "Organisation", "Company", "Concept", "Thing"]);
        assert_eq!(
            uris,
            vec![
                "http://www.ft.com/ontology/core/Thing",
                "http://www.ft.com/ontology/concept/Concept",
                "http://www.ft.com/ontology/organisation/Organisation",
                "http://www.ft.com/ontology/company/Company",
                "http://www.ft.com/ontology/company/PublicCompany",
            ]
        );
    }

    #[test]
    fn test_unknown_labels_are_ignored() {
        let uris = type_uris(["UPPIdentifier", "Thing", "Person", "Curation", "Concept"]);
        assert_eq!(
            uris,
            vec![
                "http://www.ft.com/ontology/core/Thing",
                "http://www.ft.com/ontology/concept/Concept",
                "http://www.ft.com/ontology/person/Person",
            ]
        );
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        assert_eq!(type_uris(["Person", "Person"]).len(), 1);
    }

    #[test]
    fn test_most_specific_type() {
        assert_eq!(
            most_specific_type(["Thing", "Concept", "Organisation", "Company", "PublicCompany"]),
            Some("http://www.ft.com/ontology/company/PublicCompany".to_string())
        );
        assert_eq!(
            most_specific_type(["Membership", "Thing"]),
            Some("http://www.ft.com/ontology/organisation/Membership".to_string())
        );
    }

    #[test]
    fn test_most_specific_type_fails_softly() {
        assert_eq!(most_specific_type(["Brand", "Identifier"]), None);
        assert_eq!(most_specific_type(Vec::<String>::new()), None);
    }

    #[test]
    fn test_full_type_hierarchy() {
        assert_eq!(
            full_type_hierarchy("http://www.ft.com/ontology/company/PrivateCompany"),
            vec![
                "http://www.ft.com/ontology/core/Thing",
                "http://www.ft.com/ontology/concept/Concept",
                "http://www.ft.com/ontology/organisation/Organisation",
                "http://www.ft.com/ontology/company/Company",
                "http://www.ft.com/ontology/company/PrivateCompany",
            ]
        );
        assert_eq!(
            full_type_hierarchy("http://www.ft.com/ontology/MembershipRole"),
            vec![
                "http://www.ft.com/ontology/core/Thing",
                "http://www.ft.com/ontology/concept/Concept",
                "http://www.ft.com/ontology/MembershipRole",
            ]
        );
        assert!(full_type_hierarchy("http://www.ft.com/ontology/product/Brand").is_empty());
    }

    #[test]
    fn test_api_url_walks_up_to_a_typed_path() {
        let id = "638fc0c1-c4d9-4be4-b6d9-c97a057e7d1b";
        assert_eq!(
            api_url(id, ["Thing", "Concept", "Person"], "prod"),
            format!("http://api.ft.com/people/{id}")
        );
        assert_eq!(
            api_url(id, ["Organisation", "Company", "PublicCompany"], "prod"),
            format!("http://api.ft.com/organisations/{id}")
        );
        assert_eq!(
            api_url(id, ["Thing", "Concept", "Role"], "prod"),
            format!("http://api.ft.com/things/{id}")
        );
        assert_eq!(
            api_url(id, Vec::<String>::new(), "test"),
            format!("http://test.api.ft.com/things/{id}")
        );
    }

    #[test]
    fn test_api_url_for_type() {
        assert_eq!(
            api_url_for_type(
                "1d448227-8b1b-3490-aeb8-18aa699d75f8",
                "http://www.ft.com/ontology/organisation/Organisation",
                "local"
            ),
            "http://api.ft.com/organisations/1d448227-8b1b-3490-aeb8-18aa699d75f8"
        );
    }

    #[test]
    fn test_id_url_and_uuid_suffix() {
        let id = id_url("13a9d251-71db-467a-af2f-7e56a61c910a");
        assert_eq!(id, "http://api.ft.com/things/13a9d251-71db-467a-af2f-7e56a61c910a");
        assert_eq!(uuid_from_uri(&id), "13a9d251-71db-467a-af2f-7e56a61c910a");
        assert_eq!(uuid_from_uri("bare-id"), "bare-id");
    }
}
