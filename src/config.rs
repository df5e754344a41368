//! Run-time selection and configuration of a store.
//!
//! ```
//! use contactgraph::{
//!     config::StoreConfig,
//!     contact::{Contact, SearchPolicy},
//!     core::{ConnectionStore, ContactStore},
//! };
//!
//! let mut store = StoreConfig::adj_matrix(16)
//!     .directed()
//!     .search_policy(SearchPolicy::CaseInsensitive)
//!     .build();
//!
//! store.add(Contact::new("Alice", 1)).unwrap();
//! store.add(Contact::new("Bob", 2)).unwrap();
//! store.add_connection("alice", "BOB").unwrap();
//!
//! assert!(store.is_connected("Alice", "Bob").unwrap());
//! assert!(!store.is_connected("Bob", "Alice").unwrap());
//! ```

use std::fmt;

use crate::{
    contact::SearchPolicy,
    core::marker::{Directed, Undirected},
    storage::{AdjList, AdjMatrix, AnyStore, FlatMap},
};

/// Number of slots of an adjacency matrix when none is configured.
pub const DEFAULT_MATRIX_CAPACITY: usize = 64;

/// The storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StoreKind {
    AdjList,
    AdjMatrix,
    FlatMap,
}

impl StoreKind {
    /// The search policy the storage uses unless configured otherwise.
    pub fn default_search_policy(&self) -> SearchPolicy {
        match self {
            StoreKind::AdjList | StoreKind::AdjMatrix => SearchPolicy::Exact,
            StoreKind::FlatMap => SearchPolicy::CaseInsensitive,
        }
    }

    pub fn supports_connections(&self) -> bool {
        !matches!(self, StoreKind::FlatMap)
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreKind::AdjList => "adjacency list",
            StoreKind::AdjMatrix => "adjacency matrix",
            StoreKind::FlatMap => "flat map",
        })
    }
}

/// Builder of an [`AnyStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StoreConfig {
    kind: StoreKind,
    directed: bool,
    capacity: usize,
    search_policy: Option<SearchPolicy>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(StoreKind::AdjList)
    }
}

impl StoreConfig {
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            directed: false,
            capacity: DEFAULT_MATRIX_CAPACITY,
            search_policy: None,
        }
    }

    pub fn adj_list() -> Self {
        Self::new(StoreKind::AdjList)
    }

    pub fn adj_matrix(capacity: usize) -> Self {
        Self::new(StoreKind::AdjMatrix).capacity(capacity)
    }

    pub fn flat_map() -> Self {
        Self::new(StoreKind::FlatMap)
    }

    /// Connections are not mirrored. Has no effect on a flat map.
    pub fn directed(self) -> Self {
        Self {
            directed: true,
            ..self
        }
    }

    pub fn undirected(self) -> Self {
        Self {
            directed: false,
            ..self
        }
    }

    /// Number of slots of an adjacency matrix. Has no effect on other
    /// storages.
    pub fn capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    /// Overrides the default search policy of the storage.
    pub fn search_policy(self, policy: SearchPolicy) -> Self {
        Self {
            search_policy: Some(policy),
            ..self
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.directed && self.kind.supports_connections()
    }

    /// Returns the configured capacity, if the storage has a fixed one.
    pub fn fixed_capacity(&self) -> Option<usize> {
        (self.kind == StoreKind::AdjMatrix).then_some(self.capacity)
    }

    pub fn effective_search_policy(&self) -> SearchPolicy {
        self.search_policy
            .unwrap_or_else(|| self.kind.default_search_policy())
    }

    pub fn build(&self) -> AnyStore {
        let policy = self.effective_search_policy();

        log::debug!(
            "creating {} store (directed: {}, search: {})",
            self.kind,
            self.is_directed(),
            policy
        );

        match (self.kind, self.directed) {
            (StoreKind::AdjList, false) => {
                AnyStore::AdjList(AdjList::<Undirected>::new().with_search_policy(policy))
            }
            (StoreKind::AdjList, true) => {
                AnyStore::AdjListDirected(AdjList::<Directed>::new().with_search_policy(policy))
            }
            (StoreKind::AdjMatrix, false) => AnyStore::AdjMatrix(
                AdjMatrix::<Undirected>::new(self.capacity).with_search_policy(policy),
            ),
            (StoreKind::AdjMatrix, true) => AnyStore::AdjMatrixDirected(
                AdjMatrix::<Directed>::new(self.capacity).with_search_policy(policy),
            ),
            (StoreKind::FlatMap, _) => {
                AnyStore::FlatMap(FlatMap::new().with_search_policy(policy))
            }
        }
    }
}
