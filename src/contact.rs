//! Contact records and the identity used to compare them.
//!
//! A [`Contact`] is a plain value: a display name and a numeric id. Two
//! contacts are equal when their ids are equal and their names are equal after
//! trimming and lower-casing. The same normalized pair is available as an
//! owned [`ContactKey`], which is what the storages index by.
//!
//! Contacts have no setters. Once a contact is stored, the only way to change
//! it is [`ContactStore::update`](crate::core::ContactStore::update), which
//! replaces the whole identity.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// A named contact with a numeric id.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "repr::ContactRepr", into = "repr::ContactRepr")
)]
pub struct Contact {
    name: String,
    id: i64,
}

impl Contact {
    /// Creates a contact. Surrounding whitespace of the name is removed.
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        let name = name.into();
        let trimmed = name.trim();

        let name = if trimmed.len() == name.len() {
            name
        } else {
            trimmed.to_owned()
        };

        Self { name, id }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the normalized identity of the contact.
    pub fn key(&self) -> ContactKey {
        ContactKey {
            name: normalized(&self.name).collect(),
            id: self.id,
        }
    }

    /// Returns `true` if the contact has the identity given by `key`.
    pub fn has_key(&self, key: &ContactKey) -> bool {
        self.id == key.id && normalized(&self.name).eq(key.name.chars())
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && names_eq(&self.name, &other.name)
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `PartialEq`, so the normalized characters are hashed
        // rather than the stored name.
        for c in normalized(&self.name) {
            c.hash(state);
        }
        self.id.hash(state);
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Owned, normalized identity of a contact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactKey {
    name: String,
    id: i64,
}

impl ContactKey {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

impl From<&Contact> for ContactKey {
    fn from(contact: &Contact) -> Self {
        contact.key()
    }
}

impl fmt::Display for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// How a store matches a search query against contact names.
///
/// Every backend declares its default policy. The adjacency list and matrix
/// match exactly, the flat map ignores case. The query is always trimmed
/// before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchPolicy {
    /// The query must equal the stored name, including case.
    Exact,
    /// The query and the stored name are compared lower-cased.
    CaseInsensitive,
}

impl SearchPolicy {
    /// Returns `true` if `contact` matches the `query` under this policy.
    pub fn matches(&self, contact: &Contact, query: &str) -> bool {
        let query = query.trim();
        match self {
            SearchPolicy::Exact => contact.name == query,
            SearchPolicy::CaseInsensitive => names_eq(&contact.name, query),
        }
    }

    /// Returns the form of `query` under which names are grouped by this
    /// policy.
    pub fn normalize(&self, query: &str) -> String {
        let query = query.trim();
        match self {
            SearchPolicy::Exact => query.to_owned(),
            SearchPolicy::CaseInsensitive => normalized(query).collect(),
        }
    }
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchPolicy::Exact => "exact",
            SearchPolicy::CaseInsensitive => "case-insensitive",
        })
    }
}

fn normalized(name: &str) -> impl Iterator<Item = char> + '_ {
    name.trim().chars().flat_map(char::to_lowercase)
}

fn names_eq(lhs: &str, rhs: &str) -> bool {
    normalized(lhs).eq(normalized(rhs))
}

#[cfg(feature = "serde")]
mod repr {
    use super::Contact;

    #[derive(serde::Serialize, serde::Deserialize)]
    pub struct ContactRepr {
        name: String,
        id: i64,
    }

    impl From<ContactRepr> for Contact {
        fn from(repr: ContactRepr) -> Self {
            Contact::new(repr.name, repr.id)
        }
    }

    impl From<Contact> for ContactRepr {
        fn from(contact: Contact) -> Self {
            Self {
                name: contact.name,
                id: contact.id,
            }
        }
    }
}
