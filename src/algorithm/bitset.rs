use bitvec::prelude::*;

/// Fixed-size bitset over the cell indices of a mesh
///
/// Uses 0-based indexing matching cell indices. Provides O(1) membership
/// testing; the traversals use it as their visited set.
#[derive(Clone, Debug)]
pub struct CellSet {
    bits: BitVec,
}

impl CellSet {
    /// Create a set with no cells present
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Insert a cell, returning whether it was newly inserted
    ///
    /// Cells beyond the capacity are ignored and reported as not inserted.
    pub fn insert(&mut self, cell: usize) -> bool {
        if cell >= self.bits.len() || self.contains(cell) {
            return false;
        }
        self.bits.set(cell, true);
        true
    }

    /// Remove a cell
    pub fn remove(&mut self, cell: usize) {
        if cell < self.bits.len() {
            self.bits.set(cell, false);
        }
    }

    /// Test cell membership
    pub fn contains(&self, cell: usize) -> bool {
        self.bits.get(cell).as_deref() == Some(&true)
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }
}
