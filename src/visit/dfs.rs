use std::fmt;

use crate::{
    common::VisitSet,
    contact::Contact,
    core::{ContactId, Neighbors},
};

use super::{
    raw::{RawDfs, RawVisit},
    Visitor,
};

/// Depth-first traversal in pre-order.
///
/// A contact is marked as visited when it is produced.
pub struct Dfs<'a, G> {
    graph: &'a G,
    root: ContactId,
    raw: RawVisit<RawDfs>,
}

impl<'a, G> Dfs<'a, G>
where
    G: Neighbors,
{
    /// Starts the traversal from given handle.
    pub fn new(graph: &'a G, root: ContactId) -> Self {
        let mut raw = RawVisit::new(graph.id_bound());
        raw.start(root);

        Self { graph, root, raw }
    }
}

impl<'a, G> Iterator for Dfs<'a, G>
where
    G: Neighbors,
{
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;

        loop {
            let id = self.raw.next(graph)?;

            if let Some(contact) = graph.contact(id) {
                return Some(contact);
            }
        }
    }
}

impl<G> Visitor for Dfs<'_, G> {
    fn root(&self) -> ContactId {
        self.root
    }

    fn visited_count(&self) -> usize {
        self.raw.visited.visited_count()
    }
}

impl<G> fmt::Debug for Dfs<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfs")
            .field("root", &self.root)
            .field("visited_count", &self.visited_count())
            .finish()
    }
}
