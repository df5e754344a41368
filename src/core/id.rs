use std::fmt;

/// Handle of a contact inside a graph storage.
///
/// It is a position in the adjacency list or a slot in the adjacency matrix.
/// A handle is only meaningful for the store that produced it and only until
/// that store is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContactId(usize);

impl ContactId {
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
