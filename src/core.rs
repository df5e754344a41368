//! The contract shared by all contact stores.
//!
//! Every storage implements [`ContactStore`]. Storages that keep connections
//! between contacts additionally implement [`ConnectionStore`] and
//! [`Neighbors`]. The latter is the low-level view that the algorithms
//! ([suggestions](crate::algo) and [traversals](crate::visit)) are written
//! against, so they work with any graph storage.

pub mod id;
pub mod marker;

use crate::{config::StoreKind, contact::Contact, contact::SearchPolicy, error::Error};

pub use id::ContactId;

/// What a store is able to do beyond keeping contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Connections, suggestions and traversals are supported.
    pub connections: bool,
    /// Maximum number of contacts, if the store cannot grow.
    pub capacity: Option<usize>,
}

/// Identity lookups and mutations.
pub trait ContactStore {
    type ContactsIter<'a>: Iterator<Item = &'a Contact>
    where
        Self: 'a;

    /// Inserts a contact with no connections.
    ///
    /// Fails with [`Error::DuplicateIdentity`] if an equal contact is already
    /// stored and with [`Error::CapacityExceeded`] if the store is full.
    fn add(&mut self, contact: Contact) -> Result<(), Error>;

    /// Finds a contact by name according to the store's
    /// [`search_policy`](ContactStore::search_policy). If more contacts share
    /// the name, the first one in [`list`](ContactStore::list) order is
    /// returned.
    fn search(&self, name: &str) -> Result<&Contact, Error>;

    /// Removes a contact together with all connections that touch it.
    fn delete(&mut self, name: &str) -> Result<Contact, Error>;

    /// Replaces the identity of the contact found by `old_name`.
    ///
    /// The contact keeps its position and its connections, which from now on
    /// resolve through the new identity. Fails with [`Error::NotFound`] if
    /// `old_name` does not resolve and with [`Error::DuplicateIdentity`] if the
    /// new identity belongs to another contact.
    fn update(&mut self, old_name: &str, new_name: &str, new_id: i64) -> Result<(), Error>;

    /// Iterates over all contacts, in insertion order or slot order depending
    /// on the storage.
    fn list(&self) -> Self::ContactsIter<'_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, name: &str) -> bool {
        self.search(name).is_ok()
    }

    /// Removes all contacts and connections.
    fn clear(&mut self);

    fn search_policy(&self) -> SearchPolicy;

    fn kind(&self) -> StoreKind;

    fn capabilities(&self) -> Capabilities;
}

/// Connections between contacts.
///
/// Connection endpoints are resolved by name the same way as
/// [`ContactStore::search`].
pub trait ConnectionStore: ContactStore {
    /// Connects `src` to `dst` (and `dst` to `src` in undirected stores).
    /// Connecting already connected contacts does nothing.
    fn add_connection(&mut self, src: &str, dst: &str) -> Result<(), Error>;

    /// Disconnects `src` from `dst` (and `dst` from `src` in undirected
    /// stores). Disconnecting contacts that are not connected does nothing.
    fn remove_connection(&mut self, src: &str, dst: &str) -> Result<(), Error>;

    /// Returns contacts two hops away from `name` that are not its direct
    /// connections, in the order they were discovered.
    ///
    /// Only outgoing connections are followed, so in directed stores the
    /// suggestions for two partners are generally not symmetric.
    fn suggest(&self, name: &str) -> Result<Vec<&Contact>, Error>;

    fn is_connected(&self, src: &str, dst: &str) -> Result<bool, Error>;

    /// Returns the direct (outgoing) connections of a contact.
    fn connections(&self, name: &str) -> Result<Vec<&Contact>, Error>;

    /// Returns the number of connections. A connection in an undirected store
    /// is counted once.
    fn connection_count(&self) -> usize;

    fn is_directed(&self) -> bool;
}

/// Handle-based view of the outgoing neighbor relation.
///
/// Handles are only valid until the next mutation of the store.
pub trait Neighbors: ContactStore {
    type NeighborsIter<'a>: Iterator<Item = ContactId>
    where
        Self: 'a;

    /// Finds the handle of a contact, matching the name like
    /// [`ContactStore::search`].
    fn resolve(&self, name: &str) -> Option<ContactId>;

    fn contact(&self, id: ContactId) -> Option<&Contact>;

    /// Iterates over the outgoing neighbors of a contact in their stored order.
    /// An invalid handle has no neighbors.
    fn neighbors(&self, id: ContactId) -> Self::NeighborsIter<'_>;

    /// Returns an upper bound (exclusive) on the handle values.
    fn id_bound(&self) -> usize;

    /// Iterates over the handles of all live contacts.
    fn contact_ids(&self) -> ContactIds<'_, Self>
    where
        Self: Sized,
    {
        ContactIds {
            graph: self,
            next: 0,
        }
    }
}

/// Iterator returned from [`Neighbors::contact_ids`].
pub struct ContactIds<'a, G> {
    graph: &'a G,
    next: usize,
}

impl<G: Neighbors> Iterator for ContactIds<'_, G> {
    type Item = ContactId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.graph.id_bound() {
            let id = ContactId::from_usize(self.next);
            self.next += 1;

            if self.graph.contact(id).is_some() {
                return Some(id);
            }
        }

        None
    }
}
