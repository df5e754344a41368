use crate::{
    config::StoreKind,
    contact::{Contact, SearchPolicy},
    core::{
        marker::{Directed, Undirected},
        Capabilities, ConnectionStore, ContactId, ContactStore, Neighbors,
    },
    error::Error,
    visit::{self, Bfs, Dfs},
};

use super::{adj_list, adj_matrix, AdjList, AdjMatrix, FlatMap};

/// A store whose representation is chosen at run time.
///
/// Usually created from a [`StoreConfig`](crate::config::StoreConfig). All
/// operations are forwarded to the wrapped storage. Connection operations,
/// suggestions and traversals on a [`FlatMap`] return
/// [`Error::UnsupportedCapability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyStore {
    AdjList(AdjList<Undirected>),
    AdjListDirected(AdjList<Directed>),
    AdjMatrix(AdjMatrix<Undirected>),
    AdjMatrixDirected(AdjMatrix<Directed>),
    FlatMap(FlatMap),
}

macro_rules! dispatch {
    ($self:expr, $store:ident => $body:expr) => {
        match $self {
            AnyStore::AdjList($store) => $body,
            AnyStore::AdjListDirected($store) => $body,
            AnyStore::AdjMatrix($store) => $body,
            AnyStore::AdjMatrixDirected($store) => $body,
            AnyStore::FlatMap($store) => $body,
        }
    };
}

macro_rules! dispatch_graph {
    ($self:expr, $store:ident => $body:expr, _ => $otherwise:expr) => {
        match $self {
            AnyStore::AdjList($store) => $body,
            AnyStore::AdjListDirected($store) => $body,
            AnyStore::AdjMatrix($store) => $body,
            AnyStore::AdjMatrixDirected($store) => $body,
            AnyStore::FlatMap(_) => $otherwise,
        }
    };
}

impl AnyStore {
    /// Breadth-first traversal from the contact with given name.
    pub fn bfs(&self, name: &str) -> Result<Bfs<'_, Self>, Error> {
        visit::bfs(self, name)
    }

    /// Depth-first traversal from the contact with given name.
    pub fn dfs(&self, name: &str) -> Result<Dfs<'_, Self>, Error> {
        visit::dfs(self, name)
    }

    fn unsupported() -> Error {
        Error::UnsupportedCapability(StoreKind::FlatMap)
    }
}

impl From<AdjList<Undirected>> for AnyStore {
    fn from(store: AdjList<Undirected>) -> Self {
        AnyStore::AdjList(store)
    }
}

impl From<AdjList<Directed>> for AnyStore {
    fn from(store: AdjList<Directed>) -> Self {
        AnyStore::AdjListDirected(store)
    }
}

impl From<AdjMatrix<Undirected>> for AnyStore {
    fn from(store: AdjMatrix<Undirected>) -> Self {
        AnyStore::AdjMatrix(store)
    }
}

impl From<AdjMatrix<Directed>> for AnyStore {
    fn from(store: AdjMatrix<Directed>) -> Self {
        AnyStore::AdjMatrixDirected(store)
    }
}

impl From<FlatMap> for AnyStore {
    fn from(store: FlatMap) -> Self {
        AnyStore::FlatMap(store)
    }
}

impl ContactStore for AnyStore {
    type ContactsIter<'a> = ContactsIter<'a>
    where
        Self: 'a;

    fn add(&mut self, contact: Contact) -> Result<(), Error> {
        dispatch!(self, store => store.add(contact))
    }

    fn search(&self, name: &str) -> Result<&Contact, Error> {
        dispatch!(self, store => store.search(name))
    }

    fn delete(&mut self, name: &str) -> Result<Contact, Error> {
        dispatch!(self, store => store.delete(name))
    }

    fn update(&mut self, old_name: &str, new_name: &str, new_id: i64) -> Result<(), Error> {
        dispatch!(self, store => store.update(old_name, new_name, new_id))
    }

    fn list(&self) -> Self::ContactsIter<'_> {
        match self {
            AnyStore::AdjList(store) => ContactsIter::List(store.list()),
            AnyStore::AdjListDirected(store) => ContactsIter::List(store.list()),
            AnyStore::AdjMatrix(store) => ContactsIter::Matrix(store.list()),
            AnyStore::AdjMatrixDirected(store) => ContactsIter::Matrix(store.list()),
            AnyStore::FlatMap(store) => ContactsIter::Flat(store.list()),
        }
    }

    fn len(&self) -> usize {
        dispatch!(self, store => store.len())
    }

    fn clear(&mut self) {
        dispatch!(self, store => store.clear())
    }

    fn search_policy(&self) -> SearchPolicy {
        dispatch!(self, store => store.search_policy())
    }

    fn kind(&self) -> StoreKind {
        dispatch!(self, store => store.kind())
    }

    fn capabilities(&self) -> Capabilities {
        dispatch!(self, store => store.capabilities())
    }
}

impl ConnectionStore for AnyStore {
    fn add_connection(&mut self, src: &str, dst: &str) -> Result<(), Error> {
        dispatch_graph!(self, store => store.add_connection(src, dst), _ => Err(Self::unsupported()))
    }

    fn remove_connection(&mut self, src: &str, dst: &str) -> Result<(), Error> {
        dispatch_graph!(self, store => store.remove_connection(src, dst), _ => Err(Self::unsupported()))
    }

    fn suggest(&self, name: &str) -> Result<Vec<&Contact>, Error> {
        dispatch_graph!(self, store => store.suggest(name), _ => Err(Self::unsupported()))
    }

    fn is_connected(&self, src: &str, dst: &str) -> Result<bool, Error> {
        dispatch_graph!(self, store => store.is_connected(src, dst), _ => Err(Self::unsupported()))
    }

    fn connections(&self, name: &str) -> Result<Vec<&Contact>, Error> {
        dispatch_graph!(self, store => store.connections(name), _ => Err(Self::unsupported()))
    }

    fn connection_count(&self) -> usize {
        dispatch_graph!(self, store => store.connection_count(), _ => 0)
    }

    fn is_directed(&self) -> bool {
        dispatch_graph!(self, store => store.is_directed(), _ => false)
    }
}

impl Neighbors for AnyStore {
    type NeighborsIter<'a> = NeighborsIter<'a>
    where
        Self: 'a;

    fn resolve(&self, name: &str) -> Option<ContactId> {
        match self {
            AnyStore::FlatMap(store) => store.position(name).map(ContactId::from_usize),
            _ => dispatch_graph!(self, store => store.resolve(name), _ => None),
        }
    }

    fn contact(&self, id: ContactId) -> Option<&Contact> {
        match self {
            AnyStore::FlatMap(store) => store.get(id.as_usize()),
            _ => dispatch_graph!(self, store => store.contact(id), _ => None),
        }
    }

    fn neighbors(&self, id: ContactId) -> Self::NeighborsIter<'_> {
        match self {
            AnyStore::AdjList(store) => NeighborsIter::List(store.neighbors(id)),
            AnyStore::AdjListDirected(store) => NeighborsIter::List(store.neighbors(id)),
            AnyStore::AdjMatrix(store) => NeighborsIter::Matrix(store.neighbors(id)),
            AnyStore::AdjMatrixDirected(store) => NeighborsIter::MatrixDirected(store.neighbors(id)),
            AnyStore::FlatMap(_) => NeighborsIter::Empty,
        }
    }

    fn id_bound(&self) -> usize {
        match self {
            AnyStore::FlatMap(store) => store.len(),
            _ => dispatch_graph!(self, store => store.id_bound(), _ => 0),
        }
    }
}

/// Contacts of an [`AnyStore`], in the order of the wrapped storage.
pub enum ContactsIter<'a> {
    List(adj_list::ContactsIter<'a>),
    Matrix(adj_matrix::ContactsIter<'a>),
    Flat(std::slice::Iter<'a, Contact>),
}

impl<'a> Iterator for ContactsIter<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ContactsIter::List(inner) => inner.next(),
            ContactsIter::Matrix(inner) => inner.next(),
            ContactsIter::Flat(inner) => inner.next(),
        }
    }
}

/// Outgoing neighbors in an [`AnyStore`].
pub enum NeighborsIter<'a> {
    List(adj_list::NeighborsIter<'a>),
    Matrix(adj_matrix::NeighborsIter<'a, Undirected>),
    MatrixDirected(adj_matrix::NeighborsIter<'a, Directed>),
    Empty,
}

impl Iterator for NeighborsIter<'_> {
    type Item = ContactId;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            NeighborsIter::List(inner) => inner.next(),
            NeighborsIter::Matrix(inner) => inner.next(),
            NeighborsIter::MatrixDirected(inner) => inner.next(),
            NeighborsIter::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{config::StoreConfig, storage::tests::*};

    fn graph_configs() -> Vec<StoreConfig> {
        vec![
            StoreConfig::adj_list(),
            StoreConfig::adj_list().directed(),
            StoreConfig::adj_matrix(16),
            StoreConfig::adj_matrix(16).directed(),
        ]
    }

    #[test]
    fn contacts() {
        for config in graph_configs() {
            test_contacts(config.build());
        }
        test_contacts(StoreConfig::flat_map().build());
    }

    #[test]
    fn connections() {
        for config in graph_configs() {
            if config.is_directed() {
                test_connections_directed(config.build());
            } else {
                test_connections_undirected(config.build());
            }
        }
    }

    #[test]
    fn delete_and_update() {
        for config in graph_configs() {
            test_delete_removes_connections(config.build());
            test_update_keeps_connections(config.build());
        }
    }

    #[test]
    fn suggest() {
        for config in graph_configs() {
            if config.is_directed() {
                test_suggest_directed(config.build());
            } else {
                test_suggest_undirected(config.build());
            }
        }
    }

    #[test]
    fn traversal() {
        for config in graph_configs() {
            test_traversal(config.build());
        }
    }

    #[test]
    fn flat_map_has_no_connections() {
        let mut store = StoreConfig::flat_map().build();

        store.add(Contact::new("Alice", 1)).unwrap();
        store.add(Contact::new("Bob", 2)).unwrap();

        let unsupported = Error::UnsupportedCapability(StoreKind::FlatMap);

        assert_eq!(store.add_connection("Alice", "Bob"), Err(unsupported.clone()));
        assert_eq!(store.remove_connection("Alice", "Bob"), Err(unsupported.clone()));
        assert_eq!(store.is_connected("Alice", "Bob"), Err(unsupported.clone()));
        assert_eq!(store.suggest("Alice"), Err(unsupported.clone()));
        assert_eq!(store.connections("Alice"), Err(unsupported.clone()));
        assert_matches!(store.bfs("Alice"), Err(ref error) if *error == unsupported);
        assert_matches!(store.dfs("Alice"), Err(ref error) if *error == unsupported);

        assert_eq!(store.connection_count(), 0);
        assert!(!store.is_directed());

        // Contacts are still reachable through the handle view.
        let id = store.resolve("alice").unwrap();
        assert_eq!(store.contact(id), Some(&Contact::new("Alice", 1)));
        assert_eq!(store.neighbors(id).count(), 0);
    }

    #[test]
    fn from_storage() {
        let store = AnyStore::from(AdjMatrix::<Directed>::new(4));
        assert_eq!(store.kind(), StoreKind::AdjMatrix);
        assert!(store.is_directed());

        let store = AnyStore::from(FlatMap::new());
        assert_eq!(store.kind(), StoreKind::FlatMap);
    }
}
