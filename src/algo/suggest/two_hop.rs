use crate::{
    common::{TypedBitSet, VisitSet},
    core::{ContactId, Neighbors},
    error::Error,
    visit,
};

use super::Suggestions;

pub fn two_hop<'a, G>(
    graph: &'a G,
    name: &str,
    limit: Option<usize>,
) -> Result<Suggestions<'a>, Error>
where
    G: Neighbors,
{
    let root = visit::resolve_root(graph, name)?;
    let limit = limit.unwrap_or(usize::MAX);

    // The contact itself and its direct connections are never suggested.
    let mut excluded = TypedBitSet::<ContactId>::with_capacity(graph.id_bound());
    excluded.visit(root);

    let direct = graph.neighbors(root).collect::<Vec<_>>();
    for id in direct.iter() {
        excluded.visit(*id);
    }

    let mut contacts = Vec::new();

    'outer: for id in direct {
        for candidate in graph.neighbors(id) {
            if contacts.len() >= limit {
                break 'outer;
            }

            if excluded.visit(candidate) {
                if let Some(contact) = graph.contact(candidate) {
                    contacts.push(contact);
                }
            }
        }
    }

    Ok(Suggestions { contacts })
}
