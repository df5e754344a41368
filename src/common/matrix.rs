//! Linear layout of a square connection matrix.
//!
//! Directed matrices use the full `capacity × capacity` square in row-major
//! order. Undirected matrices store only the lower triangle including the
//! diagonal, so the cells `(i, j)` and `(j, i)` are the same cell.

use crate::core::marker::EdgeType;

pub fn size_of<Ty: EdgeType>(capacity: usize) -> usize {
    if Ty::is_directed() {
        capacity * capacity
    } else {
        capacity * (capacity + 1) / 2
    }
}

pub fn index<Ty: EdgeType>(row: usize, col: usize, capacity: usize) -> usize {
    if Ty::is_directed() {
        row * capacity + col
    } else {
        // Make sure that the coordinates are in the lower triangle.
        let (row, col) = if row >= col { (row, col) } else { (col, row) };
        // The rows are 1 + 2 + 3 + ... + n = n (n + 1) / 2.
        row * (row + 1) / 2 + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::marker::{Directed, Undirected};

    #[test]
    fn directed_layout() {
        assert_eq!(size_of::<Directed>(4), 16);
        assert_eq!(index::<Directed>(1, 2, 4), 6);
        assert_eq!(index::<Directed>(2, 1, 4), 9);
    }

    #[test]
    fn undirected_layout_is_symmetric() {
        assert_eq!(size_of::<Undirected>(4), 10);

        for row in 0..4 {
            for col in 0..4 {
                let i = index::<Undirected>(row, col, 4);
                assert!(i < size_of::<Undirected>(4));
                assert_eq!(i, index::<Undirected>(col, row, 4));
            }
        }
    }
}
