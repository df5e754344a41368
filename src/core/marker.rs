//! Type-level markers of the connection direction.

/// Direction of a connection relative to a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

pub use Direction::*;

impl Direction {
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Direction::Outgoing => 0,
            Direction::Incoming => 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn opposite(&self) -> Self {
        match self {
            Outgoing => Incoming,
            Incoming => Outgoing,
        }
    }
}

/// Connections are mirrored in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undirected {}

/// Connections go only from the source to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directed {}

pub trait EdgeType: private::Sealed + 'static {
    fn is_directed() -> bool;
}

impl EdgeType for Undirected {
    fn is_directed() -> bool {
        false
    }
}

impl EdgeType for Directed {
    fn is_directed() -> bool {
        true
    }
}

mod private {
    use super::*;

    pub trait Sealed {}

    impl Sealed for Undirected {}
    impl Sealed for Directed {}
}
