#![no_main]

use libfuzzer_sys::fuzz_target;

use contactgraph::{
    core::marker::Undirected,
    infra::{ops::StoreOpsSeq, testing::check_consistency},
    storage::AdjMatrix,
};

fuzz_target!(|ops: StoreOpsSeq| {
    let mut store = AdjMatrix::<Undirected>::new(6);

    for op in ops {
        op.apply(&mut store);
        check_consistency(&store)
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});
