use crate::{contact::Contact, core::Neighbors, error::Error};

mod builder;
mod two_hop;

pub use builder::SuggestionsBuilder;

/// Contacts two hops away from a contact that are not yet connected to it.
///
/// The suggestions are ordered by discovery: direct connections are explored
/// in their stored order, and so are their own connections. Only outgoing
/// connections are followed at both hops, so in a directed store the
/// suggestions for two partners are generally not symmetric.
///
/// # Examples
///
/// ```
/// use contactgraph::{
///     algo::Suggestions,
///     contact::Contact,
///     core::{marker::Undirected, ConnectionStore, ContactStore},
///     storage::AdjList,
/// };
///
/// let mut store = AdjList::<Undirected>::new();
///
/// for (id, name) in ["Alice", "Bob", "Carol", "Dave"].into_iter().enumerate() {
///     store.add(Contact::new(name, id as i64)).unwrap();
/// }
///
/// store.add_connection("Alice", "Bob").unwrap();
/// store.add_connection("Bob", "Carol").unwrap();
/// store.add_connection("Bob", "Dave").unwrap();
///
/// let suggestions = Suggestions::on(&store).limit(1).run("Alice").unwrap();
/// assert_eq!(suggestions.len(), 1);
/// assert_eq!(suggestions.iter().next().map(Contact::name), Some("Carol"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions<'a> {
    contacts: Vec<&'a Contact>,
}

impl<'a> Suggestions<'a> {
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Contact> + '_ {
        self.contacts.iter().copied()
    }

    pub fn into_vec(self) -> Vec<&'a Contact> {
        self.contacts
    }
}

impl<'a> IntoIterator for Suggestions<'a> {
    type Item = &'a Contact;
    type IntoIter = std::vec::IntoIter<&'a Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.into_iter()
    }
}

/// Returns all suggestions for the contact with given name.
///
/// Fails with [`Error::NotFound`] if the name does not resolve and with
/// [`Error::UnsupportedCapability`] if the store does not keep connections.
pub fn suggest<'a, G>(graph: &'a G, name: &str) -> Result<Vec<&'a Contact>, Error>
where
    G: Neighbors,
{
    Suggestions::on(graph).run(name).map(Suggestions::into_vec)
}
