//! Grid-backed mesh adapting an external simulation grid reader
//!
//! The native grid file format is parsed elsewhere; this module only needs the
//! queries below. Neighbor discovery goes through shared points: two cells are
//! adjacent when they share at least one boundary point, and a cell sharing
//! several points with another is reported once per point.

use crate::io::configuration::CELL_TYPE_FIELD;
use crate::io::error::{AnalysisError, Result, out_of_range};
use crate::mesh::{Adjacency, CellType, Mesh, Polygon, integral_label};
use tracing::debug;

/// Queries a loaded simulation grid must answer
pub trait GridReader {
    /// Number of cells in the grid
    fn cell_count(&self) -> usize;

    /// Named per-cell data array, if the grid carries it
    fn cell_data(&self, name: &str) -> Option<Vec<f64>>;

    /// Point ids on the boundary of a cell
    fn cell_points(&self, cell: usize) -> Vec<usize>;

    /// Cells other than `cell` that share the given point with it
    fn point_neighbors(&self, cell: usize, point: usize) -> Vec<usize>;

    /// Boundary polygon of a cell, if the reader can expose shapes
    fn cell_polygon(&self, _cell: usize) -> Option<Polygon> {
        None
    }
}

/// Mesh whose types and adjacency come from a `GridReader`
#[derive(Debug)]
pub struct GridMesh<R> {
    reader: R,
    types: Vec<CellType>,
    adjacency: Option<Adjacency>,
    polygons: Option<Vec<Polygon>>,
}

impl<R: GridReader> GridMesh<R> {
    /// Wrap a reader, loading the cell type array
    ///
    /// Adjacency is not queried until `build_adjacency` is called.
    ///
    /// # Errors
    ///
    /// Returns `MissingTypeData` if the reader has no cell type field and
    /// `InvalidSourceData` if the field length or values are unusable
    pub fn open(reader: R) -> Result<Self> {
        let values = reader
            .cell_data(CELL_TYPE_FIELD)
            .ok_or_else(|| AnalysisError::MissingTypeData {
                field: CELL_TYPE_FIELD.to_string(),
            })?;
        let count = reader.cell_count();
        if values.len() != count {
            return Err(AnalysisError::InvalidSourceData {
                reason: format!(
                    "'{CELL_TYPE_FIELD}' has {} values for {count} cells",
                    values.len()
                ),
            });
        }
        let types = values
            .into_iter()
            .enumerate()
            .map(|(cell, value)| label_from_value(cell, value))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            reader,
            types,
            adjacency: None,
            polygons: None,
        })
    }

    /// Wrap a reader and build its adjacency immediately
    ///
    /// # Errors
    ///
    /// Returns any error from `open` or `build_adjacency`
    pub fn load(reader: R) -> Result<Self> {
        let mut mesh = Self::open(reader)?;
        mesh.build_adjacency()?;
        Ok(mesh)
    }

    /// Query the reader for every cell's neighbors
    ///
    /// Multiply-reported neighbors collapse into a single entry and every
    /// pair is stored in both directions. Self-reports are ignored.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the reader reports a cell outside the grid;
    /// the mesh is left without adjacency in that case
    pub fn build_adjacency(&mut self) -> Result<()> {
        let count = self.types.len();
        let mut adjacency = Adjacency::new(count);
        for cell in 0..count {
            for point in self.reader.cell_points(cell) {
                for neighbor in self.reader.point_neighbors(cell, point) {
                    if neighbor >= count {
                        return Err(out_of_range(neighbor, count));
                    }
                    if neighbor != cell {
                        adjacency.connect(cell, neighbor)?;
                    }
                }
            }
        }
        debug!(
            cells = count,
            pairs = adjacency.edge_count(),
            "built grid adjacency"
        );
        self.adjacency = Some(adjacency);
        Ok(())
    }

    /// Pull every cell's polygon from the reader
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the reader cannot provide a polygon
    /// for some cell
    pub fn with_geometry(mut self) -> Result<Self> {
        let polygons = (0..self.types.len())
            .map(|cell| {
                self.reader
                    .cell_polygon(cell)
                    .ok_or_else(|| AnalysisError::InvalidSourceData {
                        reason: format!("grid reader has no polygon for cell {cell}"),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        self.polygons = Some(polygons);
        Ok(self)
    }

    /// Check whether adjacency has been built
    pub const fn has_adjacency(&self) -> bool {
        self.adjacency.is_some()
    }

    /// Underlying reader
    pub const fn reader(&self) -> &R {
        &self.reader
    }
}

impl<R: GridReader> Mesh for GridMesh<R> {
    fn len(&self) -> usize {
        self.types.len()
    }

    fn type_of(&self, cell: usize) -> Result<CellType> {
        self.types
            .get(cell)
            .copied()
            .ok_or_else(|| out_of_range(cell, self.types.len()))
    }

    fn neighbors(&self, cell: usize) -> Result<&[usize]> {
        if cell >= self.types.len() {
            return Err(out_of_range(cell, self.types.len()));
        }
        self.adjacency
            .as_ref()
            .ok_or(AnalysisError::MissingData { what: "adjacency" })?
            .neighbors(cell)
    }

    fn polygon(&self, cell: usize) -> Result<Option<&Polygon>> {
        if cell >= self.types.len() {
            return Err(out_of_range(cell, self.types.len()));
        }
        Ok(self.polygons.as_ref().and_then(|polygons| polygons.get(cell)))
    }
}

/// Convert a floating point label into an integral cell type
fn label_from_value(cell: usize, value: f64) -> Result<CellType> {
    integral_label(value).ok_or_else(|| AnalysisError::InvalidSourceData {
        reason: format!("cell {cell} has non-integral type label {value}"),
    })
}
