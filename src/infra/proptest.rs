use proptest::{collection::vec, prelude::*};

use super::ops::{Name, StoreOp, StoreOpsSeq, NAME_POOL};

pub fn name() -> impl Strategy<Value = Name> {
    (0..NAME_POOL.len() as u8).prop_map(Name)
}

pub fn store_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        6 => name().prop_map(StoreOp::Add),
        1 => name().prop_map(StoreOp::Delete),
        1 => (name(), name()).prop_map(|(old, new)| StoreOp::Update(old, new)),
        8 => (name(), name()).prop_map(|(src, dst)| StoreOp::AddConnection(src, dst)),
        2 => (name(), name()).prop_map(|(src, dst)| StoreOp::RemoveConnection(src, dst)),
        2 => name().prop_map(StoreOp::Suggest),
        1 => name().prop_map(StoreOp::Bfs),
        1 => name().prop_map(StoreOp::Dfs),
        1 => Just(StoreOp::Clear),
    ]
}

/// Sequences of at most `max_len` operations.
pub fn store_ops(max_len: usize) -> impl Strategy<Value = StoreOpsSeq> {
    vec(store_op(), 0..=max_len).prop_map(StoreOpsSeq)
}
