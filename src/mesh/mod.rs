//! Mesh model shared by every builder and statistic
//!
//! This module contains:
//! - The `Mesh` capability trait implemented by every mesh source
//! - The adjacency relation and the shared cell table
//! - The grid-reader adapter and the interchange document format

/// Sorted, duplicate-free adjacency relation
pub mod adjacency;
/// Grid-reader collaborator and the grid-backed mesh
pub mod grid;
/// Interchange document format and the document-backed mesh
pub mod interchange;
/// Cell table shared by the geometry-producing builders
pub mod table;

pub use adjacency::Adjacency;
pub use grid::{GridMesh, GridReader};
pub use interchange::{DocumentMesh, MeshDocument};
pub use table::CellTable;

use crate::io::error::Result;

/// Categorical phenotype label of a cell
pub type CellType = i64;

/// Largest magnitude at which every integer is exactly representable in `f64`
const MAX_EXACT_LABEL: f64 = 9_007_199_254_740_992.0;

/// Integral cell type carried by a floating point label, if it is one
pub fn integral_label(value: f64) -> Option<CellType> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_LABEL)
        .then_some(value as CellType)
}

/// Two-dimensional vertex `[x, y]`
pub type Point = [f64; 2];

/// Ordered boundary vertices of a cell
pub type Polygon = Vec<Point>;

/// Capability interface of a mesh of typed cells
///
/// Cells are identified by indices in `[0, len())`. Every implementation must
/// report adjacency symmetrically: if `j` is a neighbor of `i`, then `i` is a
/// neighbor of `j`.
pub trait Mesh {
    /// Number of cells
    fn len(&self) -> usize;

    /// Check whether the mesh has no cells
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type label of a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `cell >= len()`
    fn type_of(&self, cell: usize) -> Result<CellType>;

    /// Sorted set of cells adjacent to a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an invalid cell and `MissingData` if the
    /// adjacency relation was never built
    fn neighbors(&self, cell: usize) -> Result<&[usize]>;

    /// Boundary polygon of a cell, if the mesh carries geometry
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `cell >= len()`
    fn polygon(&self, cell: usize) -> Result<Option<&Polygon>>;

    /// Type labels of all cells in index order
    ///
    /// # Errors
    ///
    /// Propagates errors from `type_of`
    fn types(&self) -> Result<Vec<CellType>> {
        (0..self.len()).map(|cell| self.type_of(cell)).collect()
    }
}
