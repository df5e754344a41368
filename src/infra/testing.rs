use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    contact::{Contact, ContactKey},
    core::{ConnectionStore, ContactId, Neighbors},
    error::Error as StoreError,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("contact ids iterator count ({0}) is not equal to contact count ({1})")]
    ContactIdsLenMismatch(usize, usize),
    #[error("contacts iterator count ({0}) is not equal to contact count ({1})")]
    ContactsLenMismatch(usize, usize),
    #[error("id bound ({0}) is less than contact count ({1})")]
    IdBoundInvalid(usize, usize),
    #[error("identity {0} is stored more than once")]
    DuplicateIdentity(ContactKey),
    #[error("contact {0} is connected to {1} which does not exist")]
    DanglingNeighbor(ContactId, ContactId),
    #[error("contact {0} is connected to itself")]
    SelfLoop(ContactId),
    #[error("contact {0} lists neighbor {1} more than once")]
    DuplicateNeighbor(ContactId, ContactId),
    #[error("undirected connection {0} -- {1} is not mirrored")]
    Asymmetric(ContactId, ContactId),
    #[error("sum of out degrees ({0}) does not match connection count ({1})")]
    HandshakingLemma(usize, usize),
}

/// Checks the structural invariants of a graph store.
pub fn check_consistency<G>(store: &G) -> Result<(), ConsistencyCheckError>
where
    G: ConnectionStore + Neighbors,
{
    let len = store.len();

    let ids_count = store.contact_ids().count();
    if ids_count != len {
        return Err(ConsistencyCheckError::ContactIdsLenMismatch(ids_count, len));
    }

    let contacts_count = store.list().count();
    if contacts_count != len {
        return Err(ConsistencyCheckError::ContactsLenMismatch(contacts_count, len));
    }

    if store.id_bound() < len {
        return Err(ConsistencyCheckError::IdBoundInvalid(store.id_bound(), len));
    }

    let mut identities = FxHashSet::default();
    for contact in store.list() {
        if !identities.insert(contact.key()) {
            return Err(ConsistencyCheckError::DuplicateIdentity(contact.key()));
        }
    }

    let mut degree_sum = 0;

    for id in store.contact_ids() {
        let mut seen = FxHashSet::default();

        for neighbor in store.neighbors(id) {
            if store.contact(neighbor).is_none() {
                return Err(ConsistencyCheckError::DanglingNeighbor(id, neighbor));
            }

            if neighbor == id {
                return Err(ConsistencyCheckError::SelfLoop(id));
            }

            if !seen.insert(neighbor) {
                return Err(ConsistencyCheckError::DuplicateNeighbor(id, neighbor));
            }

            if !store.is_directed() && !store.neighbors(neighbor).any(|n| n == id) {
                return Err(ConsistencyCheckError::Asymmetric(id, neighbor));
            }
        }

        degree_sum += seen.len();
    }

    // https://en.wikipedia.org/wiki/Handshaking_lemma
    let expected = if store.is_directed() {
        store.connection_count()
    } else {
        2 * store.connection_count()
    };

    if degree_sum != expected {
        return Err(ConsistencyCheckError::HandshakingLemma(
            degree_sum,
            store.connection_count(),
        ));
    }

    Ok(())
}

/// Adds contacts with ids starting at 1 and then the connections between them.
pub fn populate<G>(
    store: &mut G,
    names: &[&str],
    connections: &[(&str, &str)],
) -> Result<(), StoreError>
where
    G: ConnectionStore,
{
    for (i, name) in names.iter().enumerate() {
        store.add(Contact::new(*name, i as i64 + 1))?;
    }

    for (src, dst) in connections {
        store.add_connection(src, dst)?;
    }

    Ok(())
}
