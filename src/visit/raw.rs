use std::collections::VecDeque;

use crate::{
    common::{TypedBitSet, VisitSet},
    core::{ContactId, Neighbors},
};

pub trait TraversalCollection<T>: Default {
    fn push(&mut self, value: T);
    fn pop(&mut self) -> Option<T>;
    fn clear(&mut self);
}

pub struct Queue<T>(pub VecDeque<T>);

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self(VecDeque::new())
    }
}

impl<T> TraversalCollection<T> for Queue<T> {
    fn push(&mut self, value: T) {
        self.0.push_back(value);
    }

    fn pop(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug)]
pub struct Stack<T>(pub Vec<T>);

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> TraversalCollection<T> for Stack<T> {
    fn push(&mut self, value: T) {
        self.0.push(value);
    }

    fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

pub trait RawAlgo {
    type Collection: TraversalCollection<ContactId>;

    fn visit_on_start() -> bool;
}

pub struct RawVisit<A: RawAlgo> {
    pub collection: A::Collection,
    pub visited: TypedBitSet<ContactId>,
    // Neighbors of the current contact, reused between the steps.
    buffer: Vec<ContactId>,
}

impl<A: RawAlgo> RawVisit<A> {
    pub fn new(id_bound: usize) -> Self {
        Self {
            collection: A::Collection::default(),
            visited: TypedBitSet::with_capacity(id_bound),
            buffer: Vec::new(),
        }
    }

    pub fn start(&mut self, root: ContactId) {
        if A::visit_on_start() {
            self.visited.visit(root);
        }

        self.collection.clear();
        self.collection.push(root);
    }
}

pub enum RawBfs {}

impl RawAlgo for RawBfs {
    type Collection = Queue<ContactId>;

    fn visit_on_start() -> bool {
        true
    }
}

impl RawVisit<RawBfs> {
    pub fn next<G>(&mut self, graph: &G) -> Option<ContactId>
    where
        G: Neighbors,
    {
        let v = self.collection.pop()?;

        for u in graph.neighbors(v) {
            if self.visited.visit(u) {
                self.collection.push(u);
            }
        }

        Some(v)
    }
}

pub enum RawDfs {}

impl RawAlgo for RawDfs {
    type Collection = Stack<ContactId>;

    fn visit_on_start() -> bool {
        false
    }
}

impl RawVisit<RawDfs> {
    pub fn next<G>(&mut self, graph: &G) -> Option<ContactId>
    where
        G: Neighbors,
    {
        while let Some(v) = self.collection.pop() {
            if !self.visited.visit(v) {
                continue;
            }

            self.buffer.clear();
            self.buffer
                .extend(graph.neighbors(v).filter(|u| !self.visited.is_visited(u)));

            // Pushed in reverse so that the first neighbor is explored first,
            // which gives the same pre-order as the recursive definition.
            for u in self.buffer.drain(..).rev() {
                self.collection.push(u);
            }

            return Some(v);
        }

        None
    }
}
