use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::{
    algo,
    config::StoreKind,
    contact::{Contact, ContactKey, SearchPolicy},
    core::{marker::EdgeType, Capabilities, ConnectionStore, ContactId, ContactStore, Neighbors},
    error::{ConnectionErrorKind, Error},
};

/// Adjacency matrix with a fixed number of slots.
///
/// Every contact occupies one slot for its whole lifetime, deleting a contact
/// frees the slot for reuse. The capacity is given at construction and never
/// grows. Connection queries and mutations are a single bit operation,
/// iterating over neighbors is _O(capacity)_.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjMatrix<Ty> {
    slots: Vec<Option<Contact>>,
    matrix: raw::Matrix<Ty>,
    identities: FxHashSet<ContactKey>,
    len: usize,
    n_edges: usize,
    policy: SearchPolicy,
}

impl<Ty: EdgeType> AdjMatrix<Ty> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            slots,
            matrix: raw::Matrix::with_capacity(capacity),
            identities: FxHashSet::default(),
            len: 0,
            n_edges: 0,
            policy: StoreKind::AdjMatrix.default_search_policy(),
        }
    }

    pub fn with_search_policy(self, policy: SearchPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the slot occupied by the contact with given name.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| match slot {
            Some(contact) => self.policy.matches(contact, name),
            None => false,
        })
    }

    fn endpoints(&self, src: &str, dst: &str) -> Result<(usize, usize), Error> {
        let s = self
            .slot_of(src)
            .ok_or_else(|| Error::invalid_connection(ConnectionErrorKind::SourceAbsent, src))?;
        let d = self
            .slot_of(dst)
            .ok_or_else(|| Error::invalid_connection(ConnectionErrorKind::DestinationAbsent, dst))?;
        Ok((s, d))
    }

    fn contact_at(&self, slot: usize) -> Option<&Contact> {
        self.slots.get(slot).and_then(Option::as_ref)
    }
}

impl<Ty: EdgeType> ContactStore for AdjMatrix<Ty> {
    type ContactsIter<'a> = ContactsIter<'a>
    where
        Self: 'a;

    fn add(&mut self, contact: Contact) -> Result<(), Error> {
        if self.identities.contains(&contact.key()) {
            debug!("rejected duplicate contact {contact}");
            return Err(Error::DuplicateIdentity(contact));
        }

        let slot = match self.slots.iter().position(Option::is_none) {
            Some(slot) => slot,
            None => {
                debug!("rejected contact {contact}, all {} slots are occupied", self.capacity());
                return Err(Error::CapacityExceeded {
                    capacity: self.capacity(),
                });
            }
        };

        debug!("adding contact {contact} to slot {slot}");
        self.identities.insert(contact.key());
        self.slots[slot] = Some(contact);
        self.len += 1;

        Ok(())
    }

    fn search(&self, name: &str) -> Result<&Contact, Error> {
        self.slot_of(name)
            .and_then(|slot| self.contact_at(slot))
            .ok_or_else(|| Error::not_found(name))
    }

    fn delete(&mut self, name: &str) -> Result<Contact, Error> {
        let slot = self.slot_of(name).ok_or_else(|| Error::not_found(name))?;
        let contact = self.slots[slot].take().ok_or_else(|| Error::not_found(name))?;

        self.n_edges -= self.matrix.clear_incident(slot);
        self.identities.remove(&contact.key());
        self.len -= 1;

        debug!("deleted contact {contact}, slot {slot} is free");
        Ok(contact)
    }

    fn update(&mut self, old_name: &str, new_name: &str, new_id: i64) -> Result<(), Error> {
        let slot = self
            .slot_of(old_name)
            .ok_or_else(|| Error::not_found(old_name))?;

        let contact = Contact::new(new_name, new_id);
        let new_key = contact.key();
        let old_key = match &self.slots[slot] {
            Some(old) => old.key(),
            None => return Err(Error::not_found(old_name)),
        };

        if new_key != old_key && self.identities.contains(&new_key) {
            debug!("rejected update of {old_key} to duplicate {contact}");
            return Err(Error::DuplicateIdentity(contact));
        }

        self.identities.remove(&old_key);
        self.identities.insert(new_key);

        debug!("updating contact {old_key} in slot {slot} to {contact}");
        // The slot is reused, so its row and column stay as they are.
        self.slots[slot] = Some(contact);

        Ok(())
    }

    fn list(&self) -> Self::ContactsIter<'_> {
        ContactsIter {
            inner: self.slots.iter(),
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.matrix.clear();
        self.identities.clear();
        self.len = 0;
        self.n_edges = 0;
    }

    fn search_policy(&self) -> SearchPolicy {
        self.policy
    }

    fn kind(&self) -> StoreKind {
        StoreKind::AdjMatrix
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            connections: true,
            capacity: Some(self.capacity()),
        }
    }
}

impl<Ty: EdgeType> ConnectionStore for AdjMatrix<Ty> {
    fn add_connection(&mut self, src: &str, dst: &str) -> Result<(), Error> {
        let (s, d) = self.endpoints(src, dst)?;

        if s == d {
            return Err(Error::invalid_connection(ConnectionErrorKind::SelfLoop, src));
        }

        if self.matrix.insert(s, d) {
            self.n_edges += 1;
            trace!("connected slot {s} to slot {d}");
        }

        Ok(())
    }

    fn remove_connection(&mut self, src: &str, dst: &str) -> Result<(), Error> {
        let (s, d) = self.endpoints(src, dst)?;

        if self.matrix.remove(s, d) {
            self.n_edges -= 1;
            trace!("disconnected slot {s} from slot {d}");
        }

        Ok(())
    }

    fn suggest(&self, name: &str) -> Result<Vec<&Contact>, Error> {
        algo::suggest(self, name)
    }

    fn is_connected(&self, src: &str, dst: &str) -> Result<bool, Error> {
        let (s, d) = self.endpoints(src, dst)?;
        Ok(self.matrix.contains(s, d))
    }

    fn connections(&self, name: &str) -> Result<Vec<&Contact>, Error> {
        let slot = self.slot_of(name).ok_or_else(|| Error::not_found(name))?;

        Ok(self
            .neighbors(ContactId::from_usize(slot))
            .filter_map(|id| self.contact_at(id.as_usize()))
            .collect())
    }

    fn connection_count(&self) -> usize {
        self.n_edges
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }
}

impl<Ty: EdgeType> Neighbors for AdjMatrix<Ty> {
    type NeighborsIter<'a> = NeighborsIter<'a, Ty>
    where
        Self: 'a;

    fn resolve(&self, name: &str) -> Option<ContactId> {
        self.slot_of(name).map(ContactId::from_usize)
    }

    fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contact_at(id.as_usize())
    }

    fn neighbors(&self, id: ContactId) -> Self::NeighborsIter<'_> {
        // An empty slot never has any bit set in its row, so an invalid handle
        // yields nothing.
        let end = if id.as_usize() < self.capacity() {
            self.capacity()
        } else {
            0
        };

        NeighborsIter {
            matrix: self.matrix.detach(),
            src: id.as_usize(),
            other: 0,
            end,
        }
    }

    fn id_bound(&self) -> usize {
        self.capacity()
    }
}

/// Contacts of an [`AdjMatrix`] in slot order.
pub struct ContactsIter<'a> {
    inner: std::slice::Iter<'a, Option<Contact>>,
}

impl<'a> Iterator for ContactsIter<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().flatten().next()
    }
}

/// Outgoing neighbors of a slot in an [`AdjMatrix`], in slot order.
pub struct NeighborsIter<'a, Ty> {
    matrix: raw::DetachedMatrix<'a, Ty>,
    src: usize,
    other: usize,
    end: usize,
}

impl<Ty: EdgeType> Iterator for NeighborsIter<'_, Ty> {
    type Item = ContactId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.other < self.end {
            let dst = self.other;
            self.other += 1;

            if self.matrix.contains(self.src, dst) {
                return Some(ContactId::from_usize(dst));
            }
        }

        None
    }
}

mod raw {
    use std::marker::PhantomData;

    use bitvec::prelude::*;

    use crate::common::matrix::{index, size_of};
    use crate::core::marker::EdgeType;

    // One bit per cell. Undirected matrices store only the lower triangle, so
    // setting a cell sets both directions at once.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Matrix<Ty> {
        data: BitVec,
        capacity: usize,
        ty: PhantomData<fn() -> Ty>,
    }

    impl<Ty: EdgeType> Matrix<Ty> {
        pub fn with_capacity(capacity: usize) -> Self {
            Self {
                data: bitvec![0; size_of::<Ty>(capacity)],
                capacity,
                ty: PhantomData,
            }
        }

        pub fn contains(&self, row: usize, col: usize) -> bool {
            self.data[index::<Ty>(row, col, self.capacity)]
        }

        /// Sets the cell, returns `true` if it was not set before.
        pub fn insert(&mut self, row: usize, col: usize) -> bool {
            !self.data.replace(index::<Ty>(row, col, self.capacity), true)
        }

        /// Clears the cell, returns `true` if it was set before.
        pub fn remove(&mut self, row: usize, col: usize) -> bool {
            self.data.replace(index::<Ty>(row, col, self.capacity), false)
        }

        /// Clears the row and the column of given slot and returns the number
        /// of cleared cells.
        pub fn clear_incident(&mut self, slot: usize) -> usize {
            let mut cleared = 0;

            for other in 0..self.capacity {
                cleared += self.remove(slot, other) as usize;

                if Ty::is_directed() {
                    cleared += self.remove(other, slot) as usize;
                }
            }

            cleared
        }

        pub fn clear(&mut self) {
            self.data.fill(false);
        }

        pub fn detach(&self) -> DetachedMatrix<'_, Ty> {
            DetachedMatrix {
                data: self.data.as_bitslice(),
                capacity: self.capacity,
                ty: PhantomData,
            }
        }
    }

    pub struct DetachedMatrix<'a, Ty> {
        data: &'a BitSlice,
        capacity: usize,
        ty: PhantomData<fn() -> Ty>,
    }

    impl<Ty: EdgeType> DetachedMatrix<'_, Ty> {
        pub fn contains(&self, row: usize, col: usize) -> bool {
            self.data[index::<Ty>(row, col, self.capacity)]
        }
    }

    impl<Ty: EdgeType> std::fmt::Debug for DetachedMatrix<'_, Ty> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            if f.alternate() {
                writeln!(f, "DetachedMatrix {{")?;
                for row in 0..self.capacity {
                    write!(f, "    ")?;
                    for col in 0..self.capacity {
                        if col > 0 {
                            write!(f, " ")?;
                        }

                        write!(f, "{}", self.contains(row, col) as usize)?;
                    }
                    writeln!(f)?;
                }
                writeln!(f, "}}")
            } else {
                f.debug_struct("DetachedMatrix")
                    .field("data", &self.data)
                    .field("capacity", &self.capacity)
                    .finish()
            }
        }
    }
}
