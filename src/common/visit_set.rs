use std::{
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use fixedbitset::FixedBitSet;

use crate::core::ContactId;

/// A set of visited contacts.
pub trait VisitSet<I> {
    /// Marks the element as visited.
    ///
    /// Returns `true` when this is the first time the element is visited.
    fn visit(&mut self, id: I) -> bool;

    /// Returns `true` if the element is marked as visited.
    fn is_visited(&self, id: &I) -> bool;

    /// Returns the number of visited elements.
    fn visited_count(&self) -> usize;
}

impl VisitSet<ContactId> for FixedBitSet {
    fn visit(&mut self, id: ContactId) -> bool {
        if self.len() <= id.as_usize() {
            self.grow(id.as_usize() + 1);
        }
        !self.put(id.as_usize())
    }

    fn is_visited(&self, id: &ContactId) -> bool {
        self.contains(id.as_usize())
    }

    fn visited_count(&self) -> usize {
        self.count_ones(..)
    }
}

impl VisitSet<ContactId> for TypedBitSet<ContactId> {
    fn visit(&mut self, id: ContactId) -> bool {
        (**self).visit(id)
    }

    fn is_visited(&self, id: &ContactId) -> bool {
        (**self).is_visited(id)
    }

    fn visited_count(&self) -> usize {
        VisitSet::<ContactId>::visited_count(&**self)
    }
}

/// Tiny [`FixedBitSet`] wrapper adding a generic type of the elements the set
/// holds.
#[derive(Debug, Clone)]
pub struct TypedBitSet<T> {
    inner: FixedBitSet,
    ty: PhantomData<T>,
}

impl<T> TypedBitSet<T> {
    /// Creates a new empty bit set with given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: FixedBitSet::with_capacity(capacity),
            ty: PhantomData,
        }
    }
}

impl<T> Deref for TypedBitSet<T> {
    type Target = FixedBitSet;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for TypedBitSet<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_set_grows_on_visit() {
        let mut visited = TypedBitSet::<ContactId>::with_capacity(2);

        assert!(visited.visit(ContactId::from_usize(1)));
        assert!(!visited.visit(ContactId::from_usize(1)));
        assert!(visited.visit(ContactId::from_usize(10)));

        assert!(visited.is_visited(&ContactId::from_usize(10)));
        assert!(!visited.is_visited(&ContactId::from_usize(0)));
        assert_eq!(visited.visited_count(), 2);
    }
}
