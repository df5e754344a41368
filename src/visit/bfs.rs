use std::fmt;

use crate::{
    common::VisitSet,
    contact::Contact,
    core::{ContactId, Neighbors},
};

use super::{
    raw::{RawBfs, RawVisit},
    Visitor,
};

/// Breadth-first traversal.
///
/// Contacts are produced in non-decreasing distance from the root. A contact is
/// marked as visited when it is discovered, so [`Visitor::visited_count`] can
/// run ahead of the contacts produced so far.
pub struct Bfs<'a, G> {
    graph: &'a G,
    root: ContactId,
    raw: RawVisit<RawBfs>,
}

impl<'a, G> Bfs<'a, G>
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

impl<'a, G> Iterator for Bfs<'a, G>
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

impl<G> Visitor for Bfs<'_, G> {
    fn root(&self) -> ContactId {
        self.root
    }

    fn visited_count(&self) -> usize {
        self.raw.visited.visited_count()
    }
}

impl<G> fmt::Debug for Bfs<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bfs")
            .field("root", &self.root)
            .field("visited_count", &self.visited_count())
            .finish()
    }
}
