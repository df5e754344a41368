//! Contacts and the connections between them, kept in one of several
//! interchangeable storages.
//!
//! ```
//! use contactgraph::prelude::*;
//!
//! let mut store = StoreConfig::adj_list().build();
//!
//! store.add(Contact::new("Alice", 1)).unwrap();
//! store.add(Contact::new("Bob", 2)).unwrap();
//! store.add(Contact::new("Carol", 3)).unwrap();
//!
//! store.add_connection("Alice", "Bob").unwrap();
//! store.add_connection("Bob", "Carol").unwrap();
//!
//! let suggested = store.suggest("Alice").unwrap();
//! assert_eq!(suggested, vec![&Contact::new("Carol", 3)]);
//!
//! let reachable = store.bfs("Carol").unwrap().count();
//! assert_eq!(reachable, 3);
//! ```

pub mod algo;
pub mod common;
pub mod config;
pub mod contact;
pub mod core;
pub mod error;
pub mod infra;
pub mod storage;
pub mod visit;

pub mod prelude {
    pub use crate::{
        config::{StoreConfig, StoreKind},
        contact::{Contact, SearchPolicy},
        core::{ConnectionStore, ContactStore, Neighbors},
        error::Error,
        visit::Visitor,
    };
}
