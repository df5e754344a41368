//! Implementations of contact stores.
//!
//! A _storage_ is one representation of the contacts and their connections.
//! All storages implement [`ContactStore`](crate::core::ContactStore). The
//! graph storages additionally implement
//! [`ConnectionStore`](crate::core::ConnectionStore) and
//! [`Neighbors`](crate::core::Neighbors), so suggestions and traversals work on
//! them.
//!
//! # Storages and their properties
//!
//! The available storages are:
//!
//! * [Adjacency list](adj_list)
//! * [Adjacency matrix](adj_matrix)
//! * [Flat map](flat_map)
//!
//! The **adjacency list** grows without limit and is the best choice for
//! sparse connections. The **adjacency matrix** has a fixed number of slots
//! and answers connection queries with a single bit lookup. The **flat map**
//! keeps contacts only.
//!
//! |                    | **[AdjList]**  | **[AdjMatrix]** | **[FlatMap]** |
//! |--------------------|----------------|-----------------|---------------|
//! | add contact        | _O*(1)_        | _O(C)_          | _O*(1)_       |
//! | search             | _O(V)_         | _O(C)_          | _O(1)_        |
//! | delete contact     | _O(V + E)_     | _O(C)_          | _O(V)_        |
//! | update contact     | _O(V)_         | _O(C)_          | _O(V)_        |
//! | add connection     | _O(V + d)_     | _O(C)_          | –             |
//! | get neighbors      | _O(d)_         | _O(C)_          | –             |
//! | space              | _O(V + E)_     | _O(C²)_         | _O(V)_        |
//! | search policy      | exact          | exact           | ignores case  |
//! | list order         | insertion      | slot            | insertion     |
//!
//! * _V_ – contact count
//! * _E_ – connection count
//! * _C_ – capacity of the matrix
//! * _d_ – contact degree
//! * _O*(..)_ – amortized complexity
//!
//! [`AnyStore`] wraps any of them when the representation is chosen at run
//! time, see [`StoreConfig`](crate::config::StoreConfig).

pub mod adj_list;
pub mod adj_matrix;
pub mod any;
pub mod flat_map;

#[doc(inline)]
pub use self::{adj_list::AdjList, adj_matrix::AdjMatrix, any::AnyStore, flat_map::FlatMap};

#[cfg(test)]
pub mod tests {
    use assert_matches::assert_matches;

    use crate::{
        contact::Contact,
        core::{ConnectionStore, ContactStore, Neighbors},
        error::{ConnectionErrorKind, Error},
        infra::testing::{check_consistency, populate},
        visit::{bfs, dfs, Visitor},
    };

    fn names<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> Vec<&'a str> {
        contacts.into_iter().map(Contact::name).collect()
    }

    fn invalid(kind: ConnectionErrorKind, name: &str) -> Error {
        Error::InvalidConnection {
            kind,
            name: name.to_owned(),
        }
    }

    pub fn test_contacts<G>(mut store: G)
    where
        G: ContactStore,
    {
        assert!(store.is_empty());

        store.add(Contact::new("Alice", 1)).unwrap();
        store.add(Contact::new("Bob", 2)).unwrap();
        store.add(Contact::new("Carol", 3)).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.search("Alice"), Ok(&Contact::new("Alice", 1)));
        assert!(store.contains("Carol"));
        assert!(!store.contains("Dave"));

        assert_eq!(
            store.add(Contact::new("Alice", 1)),
            Err(Error::DuplicateIdentity(Contact::new("Alice", 1)))
        );
        assert_eq!(store.len(), 3);

        // Same name, different id.
        store.add(Contact::new("Alice", 4)).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.search("Alice").unwrap().id(), 1);

        assert_eq!(store.delete("Alice"), Ok(Contact::new("Alice", 1)));
        assert_eq!(store.search("Alice").unwrap().id(), 4);
        assert_eq!(store.delete("Zed"), Err(Error::NotFound("Zed".to_owned())));

        assert_eq!(
            store.update("Zed", "Zoe", 5),
            Err(Error::NotFound("Zed".to_owned()))
        );

        store.update("Bob", "Robert", 20).unwrap();
        assert_matches!(store.search("Bob"), Err(Error::NotFound(_)));
        assert_eq!(store.search("Robert"), Ok(&Contact::new("Robert", 20)));

        assert_eq!(
            store.update("Robert", "Carol", 3),
            Err(Error::DuplicateIdentity(Contact::new("Carol", 3)))
        );
        assert_eq!(store.search("Robert"), Ok(&Contact::new("Robert", 20)));

        assert_eq!(names(store.list()), vec!["Robert", "Carol", "Alice"]);
        assert_eq!(store.len(), 3);
    }

    pub fn test_exact_search<G>(mut store: G)
    where
        G: ContactStore,
    {
        store.add(Contact::new("Alice", 1)).unwrap();

        assert_eq!(store.search("  Alice "), Ok(&Contact::new("Alice", 1)));
        assert_matches!(store.search("alice"), Err(Error::NotFound(name)) if name == "alice");
        assert!(!store.contains("ALICE"));

        // Identity ignores case even when search does not.
        assert_matches!(
            store.add(Contact::new("ALICE", 1)),
            Err(Error::DuplicateIdentity(_))
        );
    }

    pub fn test_clear<G>(mut store: G)
    where
        G: ContactStore,
    {
        store.add(Contact::new("Alice", 1)).unwrap();
        store.add(Contact::new("Bob", 2)).unwrap();

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.list().count(), 0);
        assert_matches!(store.search("Alice"), Err(Error::NotFound(_)));

        store.add(Contact::new("Alice", 1)).unwrap();
        assert_eq!(store.len(), 1);
    }

    pub fn test_connections_undirected<G>(mut store: G)
    where
        G: ConnectionStore,
    {
        populate(&mut store, &["Alice", "Bob", "Carol"], &[]).unwrap();
        assert!(!store.is_directed());

        store.add_connection("Alice", "Bob").unwrap();
        assert_eq!(store.is_connected("Alice", "Bob"), Ok(true));
        assert_eq!(store.is_connected("Bob", "Alice"), Ok(true));
        assert_eq!(store.is_connected("Alice", "Carol"), Ok(false));
        assert_eq!(store.connection_count(), 1);

        // Idempotent in both orientations.
        store.add_connection("Alice", "Bob").unwrap();
        store.add_connection("Bob", "Alice").unwrap();
        assert_eq!(store.connection_count(), 1);

        store.add_connection("Alice", "Carol").unwrap();
        assert_eq!(names(store.connections("Alice").unwrap()), vec!["Bob", "Carol"]);
        assert_eq!(names(store.connections("Carol").unwrap()), vec!["Alice"]);

        assert_eq!(
            store.add_connection("Alice", "Zed"),
            Err(invalid(ConnectionErrorKind::DestinationAbsent, "Zed"))
        );
        assert_eq!(
            store.add_connection("Zed", "Alice"),
            Err(invalid(ConnectionErrorKind::SourceAbsent, "Zed"))
        );
        assert_eq!(
            store.add_connection("Alice", "Alice"),
            Err(invalid(ConnectionErrorKind::SelfLoop, "Alice"))
        );
        assert_eq!(store.is_connected("Alice", "Alice"), Ok(false));

        // Removal restores the previous state in both directions.
        store.remove_connection("Bob", "Alice").unwrap();
        assert_eq!(store.is_connected("Alice", "Bob"), Ok(false));
        assert_eq!(store.is_connected("Bob", "Alice"), Ok(false));
        assert_eq!(store.connection_count(), 1);

        store.remove_connection("Alice", "Bob").unwrap();
        store.remove_connection("Alice", "Alice").unwrap();
        assert_eq!(store.connection_count(), 1);

        assert_eq!(
            store.remove_connection("Alice", "Zed"),
            Err(invalid(ConnectionErrorKind::DestinationAbsent, "Zed"))
        );
        assert_matches!(store.connections("Zed"), Err(Error::NotFound(_)));
    }

    pub fn test_connections_directed<G>(mut store: G)
    where
        G: ConnectionStore,
    {
        populate(&mut store, &["Alice", "Bob", "Carol"], &[]).unwrap();
        assert!(store.is_directed());

        store.add_connection("Alice", "Bob").unwrap();
        assert_eq!(store.is_connected("Alice", "Bob"), Ok(true));
        assert_eq!(store.is_connected("Bob", "Alice"), Ok(false));
        assert!(store.connections("Bob").unwrap().is_empty());

        store.add_connection("Alice", "Bob").unwrap();
        assert_eq!(store.connection_count(), 1);

        store.add_connection("Bob", "Alice").unwrap();
        assert_eq!(store.connection_count(), 2);

        store.remove_connection("Alice", "Bob").unwrap();
        assert_eq!(store.is_connected("Alice", "Bob"), Ok(false));
        assert_eq!(store.is_connected("Bob", "Alice"), Ok(true));
        assert_eq!(store.connection_count(), 1);

        assert_eq!(
            store.remove_connection("Zed", "Bob"),
            Err(invalid(ConnectionErrorKind::SourceAbsent, "Zed"))
        );
    }

    pub fn test_delete_removes_connections<G>(mut store: G)
    where
        G: ConnectionStore + Neighbors,
    {
        populate(
            &mut store,
            &["Alice", "Bob", "Carol"],
            &[("Alice", "Bob"), ("Bob", "Carol"), ("Carol", "Alice")],
        )
        .unwrap();

        assert_eq!(store.delete("Bob"), Ok(Contact::new("Bob", 2)));

        assert_matches!(store.search("Bob"), Err(Error::NotFound(_)));
        assert!(!names(store.connections("Alice").unwrap()).contains(&"Bob"));
        assert!(!names(store.connections("Carol").unwrap()).contains(&"Bob"));
        assert_eq!(store.is_connected("Carol", "Alice"), Ok(true));
        assert_eq!(store.connection_count(), 1);
        check_consistency(&store).unwrap();

        // A new contact of the same name starts without connections.
        store.add(Contact::new("Bob", 2)).unwrap();
        assert!(store.connections("Bob").unwrap().is_empty());
        assert_eq!(store.is_connected("Alice", "Bob"), Ok(false));
        check_consistency(&store).unwrap();
    }

    pub fn test_update_keeps_connections<G>(mut store: G)
    where
        G: ConnectionStore + Neighbors,
    {
        populate(
            &mut store,
            &["Alice", "Bob", "Carol"],
            &[("Alice", "Bob"), ("Carol", "Alice")],
        )
        .unwrap();

        store.update("Alice", "Alicia", 1).unwrap();

        assert_eq!(store.search("Alicia"), Ok(&Contact::new("Alicia", 1)));
        assert_matches!(store.search("Alice"), Err(Error::NotFound(_)));
        assert_eq!(store.is_connected("Alicia", "Bob"), Ok(true));
        assert_eq!(store.is_connected("Carol", "Alicia"), Ok(true));
        assert_eq!(names(store.connections("Carol").unwrap()), vec!["Alicia"]);
        assert_eq!(store.connection_count(), 2);

        // Keeping the name and changing only the id is allowed.
        store.update("Alicia", "Alicia", 7).unwrap();
        assert_eq!(store.search("Alicia").unwrap().id(), 7);
        assert_eq!(store.is_connected("Alicia", "Bob"), Ok(true));

        check_consistency(&store).unwrap();
    }

    pub fn test_suggest_undirected<G>(mut store: G)
    where
        G: ConnectionStore,
    {
        populate(
            &mut store,
            &["Alice", "Bob", "Carol", "Dave", "Eve"],
            &[("Alice", "Bob"), ("Bob", "Carol")],
        )
        .unwrap();

        assert_eq!(names(store.suggest("Alice").unwrap()), vec!["Carol"]);
        assert_eq!(names(store.suggest("Carol").unwrap()), vec!["Alice"]);
        assert!(store.suggest("Bob").unwrap().is_empty());
        assert!(store.suggest("Eve").unwrap().is_empty());

        store.add_connection("Bob", "Dave").unwrap();
        store.add_connection("Carol", "Eve").unwrap();

        assert_eq!(names(store.suggest("Alice").unwrap()), vec!["Carol", "Dave"]);
        assert_eq!(names(store.suggest("Bob").unwrap()), vec!["Eve"]);
        assert_eq!(names(store.suggest("Eve").unwrap()), vec!["Bob"]);

        store.add_connection("Alice", "Carol").unwrap();
        assert_eq!(names(store.suggest("Alice").unwrap()), vec!["Dave", "Eve"]);

        assert_matches!(store.suggest("Zed"), Err(Error::NotFound(_)));
    }

    pub fn test_suggest_directed<G>(mut store: G)
    where
        G: ConnectionStore,
    {
        populate(
            &mut store,
            &["Alice", "Bob", "Carol"],
            &[("Alice", "Bob")],
        )
        .unwrap();

        assert!(store.suggest("Bob").unwrap().is_empty());
        assert!(store.suggest("Alice").unwrap().is_empty());

        store.add_connection("Bob", "Carol").unwrap();
        assert_eq!(names(store.suggest("Alice").unwrap()), vec!["Carol"]);
        assert!(store.suggest("Bob").unwrap().is_empty());

        store.add_connection("Carol", "Alice").unwrap();
        assert_eq!(names(store.suggest("Bob").unwrap()), vec!["Alice"]);
        assert_eq!(names(store.suggest("Carol").unwrap()), vec!["Bob"]);
    }

    pub fn test_traversal<G>(mut store: G)
    where
        G: ConnectionStore + Neighbors,
    {
        populate(
            &mut store,
            &["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"],
            &[
                ("Alice", "Bob"),
                ("Bob", "Carol"),
                ("Carol", "Dave"),
                ("Alice", "Carol"),
                ("Bob", "Frank"),
            ],
        )
        .unwrap();

        let mut visit = bfs(&store, "Alice").unwrap();
        assert_eq!(
            names(visit.by_ref()),
            vec!["Alice", "Bob", "Carol", "Frank", "Dave"]
        );
        assert_eq!(visit.visited_count(), 5);

        let mut visit = dfs(&store, "Alice").unwrap();
        assert_eq!(
            names(visit.by_ref()),
            vec!["Alice", "Bob", "Carol", "Dave", "Frank"]
        );
        assert_eq!(visit.visited_count(), 5);

        assert_eq!(names(bfs(&store, "Eve").unwrap()), vec!["Eve"]);
        assert_eq!(names(dfs(&store, "Eve").unwrap()), vec!["Eve"]);

        let reachable = if store.is_directed() { 1 } else { 5 };
        assert_eq!(bfs(&store, "Dave").unwrap().count(), reachable);
        assert_eq!(dfs(&store, "Dave").unwrap().count(), reachable);

        assert_matches!(bfs(&store, "Zed"), Err(Error::NotFound(_)));
        assert_matches!(dfs(&store, "Zed"), Err(Error::NotFound(_)));
    }

    mod proptest {
        use ::proptest::prelude::*;

        use crate::{
            config::StoreConfig,
            contact::{Contact, SearchPolicy},
            core::{
                marker::{Directed, Undirected},
                ConnectionStore, ContactStore, Neighbors,
            },
            error::Error,
            infra::{
                ops::{StoreOp, StoreOpResult, StoreOpsSeq, NAME_POOL},
                proptest::store_ops,
                testing::check_consistency,
            },
            storage::{AdjList, AdjMatrix},
            visit::{bfs, dfs, Visitor},
        };

        fn reachable_count<G: Neighbors>(store: &G, name: &str) -> usize {
            let mut visited = Vec::new();
            let mut stack = store.resolve(name).into_iter().collect::<Vec<_>>();

            while let Some(id) = stack.pop() {
                if !visited.contains(&id) {
                    visited.push(id);
                    stack.extend(store.neighbors(id));
                }
            }

            visited.len()
        }

        fn check_properties<G>(mut store: G, ops: StoreOpsSeq)
        where
            G: ConnectionStore + Neighbors,
        {
            let capacity = store.capabilities().capacity;

            for op in ops {
                let len = store.len();
                let result = op.apply(&mut store);

                check_consistency(&store)
                    .as_ref()
                    .map_err(ToString::to_string)
                    .unwrap();

                if let Some(capacity) = capacity {
                    assert!(store.len() <= capacity);
                }

                match (op, result) {
                    (StoreOp::Add(name), StoreOpResult::Add(Ok(()))) => {
                        assert!(store.list().any(|contact| *contact == name.contact()));
                        assert!(store.contains(name.get()));
                        assert_eq!(store.len(), len + 1);

                        if store.search_policy() == SearchPolicy::Exact {
                            assert_eq!(store.search(name.get()), Ok(&name.contact()));
                        }
                    }
                    (StoreOp::Add(_), StoreOpResult::Add(Err(Error::CapacityExceeded { .. }))) => {
                        assert_eq!(Some(len), capacity);
                    }
                    (StoreOp::Add(_), StoreOpResult::Add(Err(_))) => {
                        assert_eq!(store.len(), len);
                    }
                    (StoreOp::Delete(_), StoreOpResult::Delete(Ok(deleted))) => {
                        assert!(!store.list().any(|contact| *contact == deleted));
                        assert_eq!(store.len(), len - 1);
                    }
                    (StoreOp::Update(_, new), StoreOpResult::Update(Ok(()))) => {
                        assert!(store.list().any(|contact| *contact == new.contact()));
                        assert_eq!(store.len(), len);
                    }
                    (StoreOp::AddConnection(src, dst), StoreOpResult::AddConnection(Ok(()))) => {
                        assert_eq!(store.is_connected(src.get(), dst.get()), Ok(true));
                        if !store.is_directed() {
                            assert_eq!(store.is_connected(dst.get(), src.get()), Ok(true));
                        }
                    }
                    (
                        StoreOp::RemoveConnection(src, dst),
                        StoreOpResult::RemoveConnection(Ok(())),
                    ) => {
                        assert_eq!(store.is_connected(src.get(), dst.get()), Ok(false));
                        if !store.is_directed() {
                            assert_eq!(store.is_connected(dst.get(), src.get()), Ok(false));
                        }
                    }
                    (StoreOp::Suggest(name), StoreOpResult::Suggest(Ok(_))) => {
                        let suggestions = store.suggest(name.get()).unwrap();
                        let direct = store.connections(name.get()).unwrap();
                        let root = store.search(name.get()).unwrap();

                        for contact in suggestions {
                            assert_ne!(contact, root);
                            assert!(!direct.contains(&contact));
                        }
                    }
                    (
                        StoreOp::Bfs(name) | StoreOp::Dfs(name),
                        StoreOpResult::Bfs(Ok(_)) | StoreOpResult::Dfs(Ok(_)),
                    ) => {
                        let expected = reachable_count(&store, name.get());

                        let mut visit = bfs(&store, name.get()).unwrap();
                        assert_eq!(visit.by_ref().count(), expected);
                        assert_eq!(visit.visited_count(), expected);

                        let mut visit = dfs(&store, name.get()).unwrap();
                        assert_eq!(visit.by_ref().count(), expected);
                        assert_eq!(visit.visited_count(), expected);
                    }
                    _ => {}
                }
            }
        }

        fn check_agreement<G1, G2>(mut lhs: G1, mut rhs: G2, ops: StoreOpsSeq)
        where
            G1: ConnectionStore + Neighbors,
            G2: ConnectionStore + Neighbors,
        {
            for op in ops {
                assert_eq!(op.apply(&mut lhs), op.apply(&mut rhs), "{op:?}");

                let mut lhs_contacts = lhs.list().map(Contact::key).collect::<Vec<_>>();
                let mut rhs_contacts = rhs.list().map(Contact::key).collect::<Vec<_>>();
                lhs_contacts.sort_unstable();
                rhs_contacts.sort_unstable();

                assert_eq!(lhs_contacts, rhs_contacts);
                assert_eq!(lhs.connection_count(), rhs.connection_count());
            }
        }

        proptest! {
            #[test]
            #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
            fn proptest_adj_list_undirected(ops in store_ops(256)) {
                check_properties(AdjList::<Undirected>::new(), ops);
            }

            #[test]
            #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
            fn proptest_adj_list_directed(ops in store_ops(256)) {
                check_properties(AdjList::<Directed>::new(), ops);
            }

            #[test]
            #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
            fn proptest_adj_matrix_undirected(ops in store_ops(256)) {
                check_properties(AdjMatrix::<Undirected>::new(5), ops);
            }

            #[test]
            #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
            fn proptest_adj_matrix_directed(ops in store_ops(256)) {
                check_properties(AdjMatrix::<Directed>::new(5), ops);
            }

            #[test]
            #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
            fn proptest_any_store_case_insensitive(ops in store_ops(256)) {
                let store = StoreConfig::adj_list()
                    .search_policy(SearchPolicy::CaseInsensitive)
                    .build();
                check_properties(store, ops);
            }

            #[test]
            #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
            fn proptest_storages_agree_undirected(ops in store_ops(256)) {
                check_agreement(
                    AdjList::<Undirected>::new(),
                    AdjMatrix::<Undirected>::new(NAME_POOL.len()),
                    ops,
                );
            }

            #[test]
            #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
            fn proptest_storages_agree_directed(ops in store_ops(256)) {
                check_agreement(
                    AdjList::<Directed>::new(),
                    AdjMatrix::<Directed>::new(NAME_POOL.len()),
                    ops,
                );
            }
        }
    }
}
