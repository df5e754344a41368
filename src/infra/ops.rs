use std::fmt;

use crate::{
    contact::{Contact, ContactKey},
    core::{ConnectionStore, Neighbors},
    error::Error,
    visit,
};

/// Names the generated operations pick from.
///
/// The last entry differs from the first one only in case, so that the search
/// policies are exercised.
pub const NAME_POOL: [&str; 8] = [
    "Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Grace", "alice",
];

/// Index into [`NAME_POOL`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Name(pub u8);

impl Name {
    pub fn get(&self) -> &'static str {
        NAME_POOL[self.index()]
    }

    /// The id of the contact created under this name.
    pub fn id(&self) -> i64 {
        self.index() as i64 + 1
    }

    pub fn contact(&self) -> Contact {
        Contact::new(self.get(), self.id())
    }

    fn index(&self) -> usize {
        self.0 as usize % NAME_POOL.len()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum StoreOp {
    Add(Name),
    Delete(Name),
    Update(Name, Name),
    AddConnection(Name, Name),
    RemoveConnection(Name, Name),
    Suggest(Name),
    Bfs(Name),
    Dfs(Name),
    Clear,
}

/// Outcome of a [`StoreOp`].
///
/// Suggestions and traversals are recorded as sorted sets of identities, so
/// that results of storages with different neighbor orders can be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOpResult {
    Add(Result<(), Error>),
    Delete(Result<Contact, Error>),
    Update(Result<(), Error>),
    AddConnection(Result<(), Error>),
    RemoveConnection(Result<(), Error>),
    Suggest(Result<Vec<ContactKey>, Error>),
    Bfs(Result<Vec<ContactKey>, Error>),
    Dfs(Result<Vec<ContactKey>, Error>),
    Clear,
}

fn sorted_keys<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> Vec<ContactKey> {
    let mut keys = contacts.into_iter().map(Contact::key).collect::<Vec<_>>();
    keys.sort_unstable();
    keys
}

impl StoreOp {
    pub fn apply<G>(self, store: &mut G) -> StoreOpResult
    where
        G: ConnectionStore + Neighbors,
    {
        match self {
            StoreOp::Add(name) => StoreOpResult::Add(store.add(name.contact())),
            StoreOp::Delete(name) => StoreOpResult::Delete(store.delete(name.get())),
            StoreOp::Update(old, new) => {
                StoreOpResult::Update(store.update(old.get(), new.get(), new.id()))
            }
            StoreOp::AddConnection(src, dst) => {
                StoreOpResult::AddConnection(store.add_connection(src.get(), dst.get()))
            }
            StoreOp::RemoveConnection(src, dst) => {
                StoreOpResult::RemoveConnection(store.remove_connection(src.get(), dst.get()))
            }
            StoreOp::Suggest(name) => {
                StoreOpResult::Suggest(store.suggest(name.get()).map(sorted_keys))
            }
            StoreOp::Bfs(name) => {
                StoreOpResult::Bfs(visit::bfs(&*store, name.get()).map(sorted_keys))
            }
            StoreOp::Dfs(name) => {
                StoreOpResult::Dfs(visit::dfs(&*store, name.get()).map(sorted_keys))
            }
            StoreOp::Clear => {
                store.clear();
                StoreOpResult::Clear
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct StoreOpsSeq(pub Vec<StoreOp>);

impl IntoIterator for StoreOpsSeq {
    type Item = StoreOp;
    type IntoIter = std::vec::IntoIter<StoreOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl StoreOpsSeq {
    pub fn apply<G>(self, store: &mut G) -> Vec<StoreOpResult>
    where
        G: ConnectionStore + Neighbors,
    {
        self.into_iter().map(|op| op.apply(store)).collect()
    }
}

impl fmt::Debug for StoreOpsSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in self.0.iter() {
            match op {
                StoreOp::Add(name) => writeln!(
                    f,
                    "store.add(Contact::new({:?}, {}));",
                    name.get(),
                    name.id()
                )?,
                StoreOp::Delete(name) => writeln!(f, "store.delete({name:?});")?,
                StoreOp::Update(old, new) => {
                    writeln!(f, "store.update({old:?}, {new:?}, {});", new.id())?
                }
                StoreOp::AddConnection(src, dst) => {
                    writeln!(f, "store.add_connection({src:?}, {dst:?});")?
                }
                StoreOp::RemoveConnection(src, dst) => {
                    writeln!(f, "store.remove_connection({src:?}, {dst:?});")?
                }
                StoreOp::Suggest(name) => writeln!(f, "store.suggest({name:?});")?,
                StoreOp::Bfs(name) => writeln!(f, "bfs(&store, {name:?});")?,
                StoreOp::Dfs(name) => writeln!(f, "dfs(&store, {name:?});")?,
                StoreOp::Clear => writeln!(f, "store.clear();")?,
            }
        }

        Ok(())
    }
}
