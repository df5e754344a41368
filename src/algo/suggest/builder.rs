use crate::{core::Neighbors, error::Error};

use super::{two_hop::two_hop, Suggestions};

/// Builder for [`Suggestions`].
pub struct SuggestionsBuilder<'a, G> {
    graph: &'a G,
    limit: Option<usize>,
}

impl<'a> Suggestions<'a> {
    /// Starts building the suggestions for a contact of given store.
    pub fn on<G>(graph: &'a G) -> SuggestionsBuilder<'a, G>
    where
        G: Neighbors,
    {
        SuggestionsBuilder { graph, limit: None }
    }
}

impl<'a, G> SuggestionsBuilder<'a, G>
where
    G: Neighbors,
{
    /// Stops after given number of suggestions is found.
    pub fn limit(self, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    /// Runs the algorithm for the contact with given name.
    pub fn run(self, name: &str) -> Result<Suggestions<'a>, Error> {
        two_hop(self.graph, name, self.limit)
    }
}
