//! Adjacency relation stored as one sorted neighbor list per cell

use crate::io::error::{Result, out_of_range};

/// Simple undirected-by-convention adjacency relation
///
/// Each cell owns a sorted list without duplicates. `insert` adds a single
/// direction; `connect` adds both and is what builders use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Create a relation over `len` isolated cells
    pub fn new(len: usize) -> Self {
        Self {
            neighbors: vec![Vec::new(); len],
        }
    }

    /// Number of cells covered by the relation
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check whether the relation covers no cells
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Insert the directed pair `from -> to`
    ///
    /// Returns whether the pair was newly inserted.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if either index is not a cell of the relation
    pub fn insert(&mut self, from: usize, to: usize) -> Result<bool> {
        let len = self.len();
        if to >= len {
            return Err(out_of_range(to, len));
        }
        let row = self
            .neighbors
            .get_mut(from)
            .ok_or_else(|| out_of_range(from, len))?;
        match row.binary_search(&to) {
            Ok(_) => Ok(false),
            Err(position) => {
                row.insert(position, to);
                Ok(true)
            }
        }
    }

    /// Insert both `a -> b` and `b -> a`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if either index is not a cell of the relation
    pub fn connect(&mut self, a: usize, b: usize) -> Result<()> {
        self.insert(a, b)?;
        self.insert(b, a)?;
        Ok(())
    }

    /// Neighbors of a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `cell` is not a cell of the relation
    pub fn neighbors(&self, cell: usize) -> Result<&[usize]> {
        self.neighbors
            .get(cell)
            .map(Vec::as_slice)
            .ok_or_else(|| out_of_range(cell, self.len()))
    }

    /// Test whether `from -> to` is present
    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.neighbors
            .get(from)
            .is_some_and(|row| row.binary_search(&to).is_ok())
    }

    /// Total number of directed pairs
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }

    /// All directed pairs in ascending order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(from, row)| row.iter().map(move |&to| (from, to)))
    }

    /// First directed pair whose reverse is missing, if any
    pub fn find_asymmetry(&self) -> Option<(usize, usize)> {
        self.pairs().find(|&(from, to)| !self.contains(to, from))
    }

    /// Check that every pair has its reverse
    pub fn is_symmetric(&self) -> bool {
        self.find_asymmetry().is_none()
    }
}
