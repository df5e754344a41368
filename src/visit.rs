//! Breadth-first and depth-first traversal of the connections.
//!
//! Both traversals are **iterative**, they don't use recursion. The visitors
//! are lazy iterators over the visited contacts and can be stopped at any
//! time. Only outgoing connections are followed. Neighbors of a contact are
//! explored in their stored order (insertion order in the adjacency list, slot
//! order in the adjacency matrix).
//!
//! ```
//! use contactgraph::{
//!     contact::Contact,
//!     core::{marker::Undirected, ConnectionStore, ContactStore},
//!     storage::AdjList,
//!     visit::{bfs, dfs, Visitor},
//! };
//!
//! let mut store = AdjList::<Undirected>::new();
//!
//! for (id, name) in ["Alice", "Bob", "Carol", "Dave"].into_iter().enumerate() {
//!     store.add(Contact::new(name, id as i64)).unwrap();
//! }
//!
//! store.add_connection("Alice", "Bob").unwrap();
//! store.add_connection("Bob", "Carol").unwrap();
//! store.add_connection("Alice", "Dave").unwrap();
//!
//! let names = bfs(&store, "Alice").unwrap().map(Contact::name).collect::<Vec<_>>();
//! assert_eq!(names, vec!["Alice", "Bob", "Dave", "Carol"]);
//!
//! let mut visit = dfs(&store, "Alice").unwrap();
//! let names = visit.by_ref().map(Contact::name).collect::<Vec<_>>();
//! assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);
//! assert_eq!(visit.visited_count(), 4);
//! ```

pub mod bfs;
pub mod dfs;

pub(crate) mod raw;

#[doc(inline)]
pub use self::{bfs::Bfs, dfs::Dfs};

use crate::{
    core::{ContactId, Neighbors},
    error::Error,
};

/// Common interface of the traversals.
pub trait Visitor {
    /// Returns the handle of the contact the traversal started from.
    fn root(&self) -> ContactId;

    /// Returns the number of contacts marked as visited so far.
    ///
    /// Once the traversal is exhausted, this is the size of the set of
    /// contacts reachable from the root (including the root).
    fn visited_count(&self) -> usize;
}

/// Starts a breadth-first traversal from the contact with given name.
///
/// Fails with [`Error::UnsupportedCapability`] if the store does not keep
/// connections and with [`Error::NotFound`] if the name does not resolve.
pub fn bfs<'a, G>(graph: &'a G, name: &str) -> Result<Bfs<'a, G>, Error>
where
    G: Neighbors,
{
    let root = resolve_root(graph, name)?;
    Ok(Bfs::new(graph, root))
}

/// Starts a depth-first traversal from the contact with given name.
///
/// The contacts are produced in pre-order. Fails like [`bfs`].
pub fn dfs<'a, G>(graph: &'a G, name: &str) -> Result<Dfs<'a, G>, Error>
where
    G: Neighbors,
{
    let root = resolve_root(graph, name)?;
    Ok(Dfs::new(graph, root))
}

pub(crate) fn resolve_root<G>(graph: &G, name: &str) -> Result<ContactId, Error>
where
    G: Neighbors,
{
    if !graph.capabilities().connections {
        return Err(Error::UnsupportedCapability(graph.kind()));
    }

    graph.resolve(name).ok_or_else(|| Error::not_found(name))
}
