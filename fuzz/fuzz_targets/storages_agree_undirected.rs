#![no_main]

use libfuzzer_sys::fuzz_target;

use contactgraph::{
    contact::Contact,
    core::{marker::Undirected, ConnectionStore, ContactStore},
    infra::ops::{StoreOpsSeq, NAME_POOL},
    storage::{AdjList, AdjMatrix},
};

fuzz_target!(|ops: StoreOpsSeq| {
    let mut adj_list = AdjList::<Undirected>::new();
    // Every name fits, so the matrix never runs out of slots.
    let mut adj_matrix = AdjMatrix::<Undirected>::new(NAME_POOL.len());

    for op in ops {
        let lhs = op.apply(&mut adj_list);
        let rhs = op.apply(&mut adj_matrix);

        if lhs != rhs {
            panic!("storages disagree on {op:?}:\n  AdjList: {lhs:?}\n  AdjMatrix: {rhs:?}");
        }

        let mut lhs = adj_list.list().map(Contact::key).collect::<Vec<_>>();
        let mut rhs = adj_matrix.list().map(Contact::key).collect::<Vec<_>>();
        lhs.sort_unstable();
        rhs.sort_unstable();

        assert_eq!(lhs, rhs, "storages hold different contacts");
        assert_eq!(adj_list.connection_count(), adj_matrix.connection_count());
    }
});
