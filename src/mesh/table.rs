//! Cell table backing the geometry-producing mesh variants

use crate::io::error::{AnalysisError, Result, invalid_document, out_of_range};
use crate::mesh::interchange::MeshDocument;
use crate::mesh::{Adjacency, CellType, Polygon};

/// Types, optional polygons and optional adjacency of a set of cells
///
/// Owned by the lattice, Voronoi and document meshes, which forward the
/// `Mesh` contract to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTable {
    types: Vec<CellType>,
    polygons: Option<Vec<Polygon>>,
    adjacency: Option<Adjacency>,
}

impl CellTable {
    /// Create a table from per-cell types
    pub const fn new(types: Vec<CellType>) -> Self {
        Self {
            types,
            polygons: None,
            adjacency: None,
        }
    }

    /// Attach one polygon per cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` if the polygon count differs from the cell count
    pub fn with_polygons(mut self, polygons: Vec<Polygon>) -> Result<Self> {
        if polygons.len() != self.types.len() {
            return Err(invalid_document(&format!(
                "{} polygons for {} cells",
                polygons.len(),
                self.types.len()
            )));
        }
        self.polygons = Some(polygons);
        Ok(self)
    }

    /// Attach the adjacency relation
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` if the relation covers a different number of cells
    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Result<Self> {
        if adjacency.len() != self.types.len() {
            return Err(invalid_document(&format!(
                "adjacency covers {} cells, mesh has {}",
                adjacency.len(),
                self.types.len()
            )));
        }
        self.adjacency = Some(adjacency);
        Ok(self)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check whether the table has no cells
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type label of a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an invalid cell
    pub fn type_of(&self, cell: usize) -> Result<CellType> {
        self.types
            .get(cell)
            .copied()
            .ok_or_else(|| out_of_range(cell, self.len()))
    }

    /// Neighbors of a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an invalid cell and `MissingData` without adjacency
    pub fn neighbors(&self, cell: usize) -> Result<&[usize]> {
        if cell >= self.len() {
            return Err(out_of_range(cell, self.len()));
        }
        self.adjacency
            .as_ref()
            .ok_or(AnalysisError::MissingData { what: "adjacency" })?
            .neighbors(cell)
    }

    /// Polygon of a cell, if geometry is attached
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an invalid cell
    pub fn polygon(&self, cell: usize) -> Result<Option<&Polygon>> {
        if cell >= self.len() {
            return Err(out_of_range(cell, self.len()));
        }
        Ok(self.polygons.as_ref().and_then(|polygons| polygons.get(cell)))
    }

    /// Per-cell types
    pub fn types(&self) -> &[CellType] {
        &self.types
    }

    /// Per-cell polygons, if attached
    pub fn polygons(&self) -> Option<&[Polygon]> {
        self.polygons.as_deref()
    }

    /// Adjacency relation, if attached
    pub const fn adjacency(&self) -> Option<&Adjacency> {
        self.adjacency.as_ref()
    }

    /// Export the table as an interchange document
    ///
    /// # Errors
    ///
    /// Returns `MissingData` if the adjacency relation was never attached
    pub fn to_document(&self) -> Result<MeshDocument> {
        let adjacency = self
            .adjacency
            .as_ref()
            .ok_or(AnalysisError::MissingData { what: "adjacency" })?;
        let n = self.len();
        Ok(MeshDocument {
            types: self.types.clone(),
            polygons: self.polygons.clone(),
            adjacencies: adjacency.pairs().collect(),
            shape: (n, n),
        })
    }
}
