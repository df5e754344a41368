use log::debug;
use rustc_hash::FxHashMap;

use crate::{
    config::StoreKind,
    contact::{Contact, SearchPolicy},
    core::{Capabilities, ContactStore},
    error::Error,
};

/// Contacts without connections.
///
/// Contacts are kept in insertion order and indexed by their lower-cased name.
/// This storage implements only [`ContactStore`]; wrapped in
/// [`AnyStore`](super::AnyStore), connection operations report
/// [`Error::UnsupportedCapability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMap {
    contacts: Vec<Contact>,
    // Lower-cased name -> ascending positions in `contacts`.
    index: FxHashMap<String, Vec<usize>>,
    policy: SearchPolicy,
}

impl FlatMap {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            index: FxHashMap::default(),
            policy: StoreKind::FlatMap.default_search_policy(),
        }
    }

    pub fn with_search_policy(self, policy: SearchPolicy) -> Self {
        Self { policy, ..self }
    }

    fn bucket(name: &str) -> String {
        SearchPolicy::CaseInsensitive.normalize(name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&Self::bucket(name))?.iter().copied().find(|i| {
            self.policy.matches(&self.contacts[*i], name)
        })
    }

    pub(crate) fn get(&self, position: usize) -> Option<&Contact> {
        self.contacts.get(position)
    }

    fn find_equal(&self, contact: &Contact) -> Option<usize> {
        self.index
            .get(&Self::bucket(contact.name()))?
            .iter()
            .copied()
            .find(|i| self.contacts[*i] == *contact)
    }

    fn index_insert(&mut self, name: &str, position: usize) {
        let bucket = self.index.entry(Self::bucket(name)).or_default();
        let at = bucket.partition_point(|i| *i < position);
        bucket.insert(at, position);
    }

    fn index_remove(&mut self, name: &str, position: usize) {
        let key = Self::bucket(name);

        if let Some(bucket) = self.index.get_mut(&key) {
            bucket.retain(|i| *i != position);

            if bucket.is_empty() {
                self.index.remove(&key);
            }
        }
    }
}

impl Default for FlatMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore for FlatMap {
    type ContactsIter<'a> = std::slice::Iter<'a, Contact>
    where
        Self: 'a;

    fn add(&mut self, contact: Contact) -> Result<(), Error> {
        if self.find_equal(&contact).is_some() {
            debug!("rejected duplicate contact {contact}");
            return Err(Error::DuplicateIdentity(contact));
        }

        let position = self.contacts.len();
        self.index_insert(contact.name(), position);

        debug!("adding contact {contact}");
        self.contacts.push(contact);
        Ok(())
    }

    fn search(&self, name: &str) -> Result<&Contact, Error> {
        self.position(name)
            .map(|i| &self.contacts[i])
            .ok_or_else(|| Error::not_found(name))
    }

    fn delete(&mut self, name: &str) -> Result<Contact, Error> {
        let position = self.position(name).ok_or_else(|| Error::not_found(name))?;

        let contact = self.contacts.remove(position);
        self.index_remove(contact.name(), position);

        for bucket in self.index.values_mut() {
            for i in bucket.iter_mut() {
                if *i > position {
                    *i -= 1;
                }
            }
        }

        debug!("deleted contact {contact}");
        Ok(contact)
    }

    fn update(&mut self, old_name: &str, new_name: &str, new_id: i64) -> Result<(), Error> {
        let position = self
            .position(old_name)
            .ok_or_else(|| Error::not_found(old_name))?;

        let contact = Contact::new(new_name, new_id);

        match self.find_equal(&contact) {
            Some(other) if other != position => {
                debug!(
                    "rejected update of {} to duplicate {contact}",
                    self.contacts[position]
                );
                return Err(Error::DuplicateIdentity(contact));
            }
            _ => {}
        }

        let previous = self.contacts[position].name().to_owned();
        self.index_remove(&previous, position);
        self.index_insert(contact.name(), position);
        let old = std::mem::replace(&mut self.contacts[position], contact);

        debug!("updated contact {old} to {}", self.contacts[position]);
        Ok(())
    }

    fn list(&self) -> Self::ContactsIter<'_> {
        self.contacts.iter()
    }

    fn len(&self) -> usize {
        self.contacts.len()
    }

    fn clear(&mut self) {
        self.contacts.clear();
        self.index.clear();
    }

    fn search_policy(&self) -> SearchPolicy {
        self.policy
    }

    fn kind(&self) -> StoreKind {
        StoreKind::FlatMap
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            connections: false,
            capacity: None,
        }
    }
}
