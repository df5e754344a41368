use std::marker::PhantomData;

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::{
    algo,
    config::StoreKind,
    contact::{Contact, ContactKey, SearchPolicy},
    core::{
        marker::{Direction, EdgeType},
        Capabilities, ConnectionStore, ContactId, ContactStore, Neighbors,
    },
    error::{ConnectionErrorKind, Error},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Vertex {
    contact: Contact,
    // Outgoing and incoming neighbors. Undirected lists use only the outgoing
    // one for both directions.
    edges: [Vec<ContactId>; 2],
}

impl Vertex {
    fn new(contact: Contact) -> Self {
        Self {
            contact,
            edges: [Vec::new(), Vec::new()],
        }
    }
}

/// Unbounded adjacency list.
///
/// Contacts are kept in insertion order and each of them has an ordered list
/// of its neighbors. Removing a contact is _O(V + E)_ since all neighbor lists
/// must be scanned and renumbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjList<Ty> {
    vertices: Vec<Vertex>,
    identities: FxHashSet<ContactKey>,
    n_edges: usize,
    policy: SearchPolicy,
    ty: PhantomData<fn() -> Ty>,
}

impl<Ty: EdgeType> AdjList<Ty> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            identities: FxHashSet::default(),
            n_edges: 0,
            policy: StoreKind::AdjList.default_search_policy(),
            ty: PhantomData,
        }
    }

    pub fn with_search_policy(self, policy: SearchPolicy) -> Self {
        Self { policy, ..self }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.vertices
            .iter()
            .position(|vertex| self.policy.matches(&vertex.contact, name))
    }

    fn endpoints(&self, src: &str, dst: &str) -> Result<(usize, usize), Error> {
        let s = self
            .position(src)
            .ok_or_else(|| Error::invalid_connection(ConnectionErrorKind::SourceAbsent, src))?;
        let d = self
            .position(dst)
            .ok_or_else(|| Error::invalid_connection(ConnectionErrorKind::DestinationAbsent, dst))?;
        Ok((s, d))
    }

    // Lists updated on the source and on the destination of a connection.
    fn directions() -> [Direction; 2] {
        let dir = Direction::Outgoing;

        if Ty::is_directed() {
            [dir, dir.opposite()]
        } else {
            [dir, dir]
        }
    }

    fn disconnect(edges: &mut Vec<ContactId>, id: ContactId) -> bool {
        match edges.iter().position(|edge| *edge == id) {
            Some(i) => {
                // Keep the order of the remaining neighbors.
                edges.remove(i);
                true
            }
            None => false,
        }
    }
}

impl<Ty: EdgeType> Default for AdjList<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> ContactStore for AdjList<Ty> {
    type ContactsIter<'a> = ContactsIter<'a>
    where
        Self: 'a;

    fn add(&mut self, contact: Contact) -> Result<(), Error> {
        if !self.identities.insert(contact.key()) {
            debug!("rejected duplicate contact {contact}");
            return Err(Error::DuplicateIdentity(contact));
        }

        debug!("adding contact {contact} at position {}", self.vertices.len());
        self.vertices.push(Vertex::new(contact));
        Ok(())
    }

    fn search(&self, name: &str) -> Result<&Contact, Error> {
        self.position(name)
            .map(|i| &self.vertices[i].contact)
            .ok_or_else(|| Error::not_found(name))
    }

    fn delete(&mut self, name: &str) -> Result<Contact, Error> {
        let index = self.position(name).ok_or_else(|| Error::not_found(name))?;
        let removed = ContactId::from_usize(index);

        let vertex = self.vertices.remove(index);
        self.identities.remove(&vertex.contact.key());

        self.n_edges -= vertex.edges[Direction::Outgoing.index()].len();
        if Ty::is_directed() {
            self.n_edges -= vertex.edges[Direction::Incoming.index()].len();
        }

        // Drop all references to the removed contact and shift the handles of
        // the contacts that followed it.
        for other in self.vertices.iter_mut() {
            for edges in other.edges.iter_mut() {
                edges.retain(|id| *id != removed);

                for id in edges.iter_mut() {
                    if *id > removed {
                        *id = ContactId::from_usize(id.as_usize() - 1);
                    }
                }
            }
        }

        debug!("deleted contact {}", vertex.contact);
        Ok(vertex.contact)
    }

    fn update(&mut self, old_name: &str, new_name: &str, new_id: i64) -> Result<(), Error> {
        let index = self
            .position(old_name)
            .ok_or_else(|| Error::not_found(old_name))?;

        let contact = Contact::new(new_name, new_id);
        let old_key = self.vertices[index].contact.key();
        let new_key = contact.key();

        if new_key != old_key && self.identities.contains(&new_key) {
            debug!("rejected update of {old_key} to duplicate {contact}");
            return Err(Error::DuplicateIdentity(contact));
        }

        self.identities.remove(&old_key);
        self.identities.insert(new_key);

        // Neighbor lists hold handles, which stay the same, so the connections
        // follow the new identity without relinking.
        let old = std::mem::replace(&mut self.vertices[index].contact, contact);
        debug!("updated contact {old} to {}", self.vertices[index].contact);

        Ok(())
    }

    fn list(&self) -> Self::ContactsIter<'_> {
        ContactsIter {
            inner: self.vertices.iter(),
        }
    }

    fn len(&self) -> usize {
        self.vertices.len()
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.identities.clear();
        self.n_edges = 0;
    }

    fn search_policy(&self) -> SearchPolicy {
        self.policy
    }

    fn kind(&self) -> StoreKind {
        StoreKind::AdjList
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            connections: true,
            capacity: None,
        }
    }
}

impl<Ty: EdgeType> ConnectionStore for AdjList<Ty> {
    fn add_connection(&mut self, src: &str, dst: &str) -> Result<(), Error> {
        let (s, d) = self.endpoints(src, dst)?;

        if s == d {
            return Err(Error::invalid_connection(ConnectionErrorKind::SelfLoop, src));
        }

        let (s_id, d_id) = (ContactId::from_usize(s), ContactId::from_usize(d));
        let directions = Self::directions();

        if self.vertices[s].edges[directions[0].index()].contains(&d_id) {
            return Ok(());
        }

        self.vertices[s].edges[directions[0].index()].push(d_id);
        self.vertices[d].edges[directions[1].index()].push(s_id);
        self.n_edges += 1;

        trace!(
            "connected {} to {}",
            self.vertices[s].contact,
            self.vertices[d].contact
        );
        Ok(())
    }

    fn remove_connection(&mut self, src: &str, dst: &str) -> Result<(), Error> {
        let (s, d) = self.endpoints(src, dst)?;

        let (s_id, d_id) = (ContactId::from_usize(s), ContactId::from_usize(d));
        let directions = Self::directions();

        if Self::disconnect(&mut self.vertices[s].edges[directions[0].index()], d_id) {
            Self::disconnect(&mut self.vertices[d].edges[directions[1].index()], s_id);
            self.n_edges -= 1;

            trace!(
                "disconnected {} from {}",
                self.vertices[s].contact,
                self.vertices[d].contact
            );
        }

        Ok(())
    }

    fn suggest(&self, name: &str) -> Result<Vec<&Contact>, Error> {
        algo::suggest(self, name)
    }

    fn is_connected(&self, src: &str, dst: &str) -> Result<bool, Error> {
        let (s, d) = self.endpoints(src, dst)?;
        Ok(self.vertices[s].edges[Direction::Outgoing.index()].contains(&ContactId::from_usize(d)))
    }

    fn connections(&self, name: &str) -> Result<Vec<&Contact>, Error> {
        let index = self.position(name).ok_or_else(|| Error::not_found(name))?;

        Ok(self.vertices[index].edges[Direction::Outgoing.index()]
            .iter()
            .map(|id| &self.vertices[id.as_usize()].contact)
            .collect())
    }

    fn connection_count(&self) -> usize {
        self.n_edges
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }
}

impl<Ty: EdgeType> Neighbors for AdjList<Ty> {
    type NeighborsIter<'a> = NeighborsIter<'a>
    where
        Self: 'a;

    fn resolve(&self, name: &str) -> Option<ContactId> {
        self.position(name).map(ContactId::from_usize)
    }

    fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.vertices.get(id.as_usize()).map(|vertex| &vertex.contact)
    }

    fn neighbors(&self, id: ContactId) -> Self::NeighborsIter<'_> {
        let edges = match self.vertices.get(id.as_usize()) {
            Some(vertex) => vertex.edges[Direction::Outgoing.index()].as_slice(),
            None => &[],
        };

        NeighborsIter {
            inner: edges.iter(),
        }
    }

    fn id_bound(&self) -> usize {
        self.vertices.len()
    }
}

/// Contacts of an [`AdjList`] in insertion order.
pub struct ContactsIter<'a> {
    inner: std::slice::Iter<'a, Vertex>,
}

impl<'a> Iterator for ContactsIter<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|vertex| &vertex.contact)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ContactsIter<'_> {}

/// Outgoing neighbors of a contact in an [`AdjList`].
pub struct NeighborsIter<'a> {
    inner: std::slice::Iter<'a, ContactId>,
}

impl Iterator for NeighborsIter<'_> {
    type Item = ContactId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
