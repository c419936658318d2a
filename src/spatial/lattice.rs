//! Synthetic hexagonal lattice meshes with selectable type patterns
//!
//! Hexagons are flat-topped with unit area. Cell `k = column + row * columns`
//! sits at `(column * 3R, row * r)`, odd rows shifted right by `1.5R`, so
//! consecutive rows interlock in a staggered brick pattern and the cell
//! directly above or below is two rows away.

use crate::io::configuration::{LATTICE_BANDS, MAX_LATTICE_DIMENSION, RANDOM_TYPE_COUNT};
use crate::io::error::{Result, invalid_parameter};
use crate::mesh::{Adjacency, CellTable, CellType, Mesh, MeshDocument, Point, Polygon};
use rand::Rng;
use std::f64::consts::FRAC_PI_3;
use tracing::debug;

/// Circumradius giving each hexagon unit area
pub fn circumradius() -> f64 {
    (2.0 / (3.0 * 3.0_f64.sqrt())).sqrt()
}

/// Apothem (center to edge midpoint) of the unit-area hexagon
pub fn apothem() -> f64 {
    circumradius() * (FRAC_PI_3 / 2.0).cos()
}

/// Spatial arrangement of cell types over a lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Pattern {
    /// Three horizontal bands of rows
    Stripes,
    /// Three vertical bands of column groups
    TransposedStripes,
    /// Alternating two-type column bands
    Checkerboard,
    /// Uniformly random over three types
    Random,
}

impl Pattern {
    /// Type of the cell at `column`, `row` of a `columns x rows` lattice
    ///
    /// Every pattern except `Random` ignores `rng`.
    pub fn type_at<R: Rng + ?Sized>(
        self,
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
        rng: &mut R,
    ) -> CellType {
        match self {
            Self::Stripes => band(row, rows),
            Self::TransposedStripes => band(column, columns),
            Self::Checkerboard => (column % 2) as CellType,
            Self::Random => rng.random_range(0..RANDOM_TYPE_COUNT),
        }
    }
}

/// Which of `LATTICE_BANDS` equal bands `index` falls into
fn band(index: usize, extent: usize) -> CellType {
    (index * LATTICE_BANDS / extent.max(1)).min(LATTICE_BANDS - 1) as CellType
}

/// Horizontal side a neighbor candidate must lie on
#[derive(Clone, Copy)]
enum Side {
    Any,
    Left,
    Right,
}

/// Geometry and connectivity of a `columns x rows` hexagonal lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexLattice {
    columns: usize,
    rows: usize,
}

impl HexLattice {
    /// Create a lattice of `columns` cells per row and `rows` rows
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a dimension is zero or exceeds
    /// `MAX_LATTICE_DIMENSION`
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        for (parameter, value) in [("columns", columns), ("rows", rows)] {
            if value == 0 || value > MAX_LATTICE_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_LATTICE_DIMENSION}"),
                ));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Cells per row
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// Lattices always hold at least one cell
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Center of a cell
    pub fn center(&self, cell: usize) -> Point {
        let big = circumradius();
        let column = (cell % self.columns) as f64;
        let row = cell / self.columns;
        let shift = if row % 2 == 1 { 1.5 * big } else { 0.0 };
        [column.mul_add(3.0 * big, shift), row as f64 * apothem()]
    }

    /// Hexagon of a cell, six vertices at 60 degree steps from angle 0
    pub fn hexagon(&self, cell: usize) -> Polygon {
        let [cx, cy] = self.center(cell);
        let big = circumradius();
        (0..6_u8)
            .map(|step| {
                let angle = f64::from(step) * FRAC_PI_3;
                [big.mul_add(angle.cos(), cx), big.mul_add(angle.sin(), cy)]
            })
            .collect()
    }

    /// Accepted neighbor candidates of a cell, one direction only
    ///
    /// Candidates off either end of a row are suppressed by requiring the
    /// diagonal candidates to lie strictly left or right of the cell.
    pub fn neighbor_candidates(&self, cell: usize) -> Vec<usize> {
        let n = self.columns as i64;
        let k = cell as i64;
        let odd_row = (cell / self.columns) % 2 == 1;
        let offsets = if odd_row {
            [
                (-2 * n, Side::Any),
                (2 * n, Side::Any),
                (-n, Side::Any),
                (-n + 1, Side::Right),
                (n, Side::Any),
                (n + 1, Side::Right),
            ]
        } else {
            [
                (-2 * n, Side::Any),
                (2 * n, Side::Any),
                (-n - 1, Side::Left),
                (-n, Side::Any),
                (n - 1, Side::Left),
                (n, Side::Any),
            ]
        };

        let total = self.len() as i64;
        offsets
            .into_iter()
            .filter_map(|(offset, side)| {
                let candidate = k + offset;
                if candidate < 0 || candidate >= total {
                    return None;
                }
                let accepted = match side {
                    Side::Any => true,
                    Side::Left => candidate % n < k % n,
                    Side::Right => candidate % n > k % n,
                };
                accepted.then_some(candidate as usize)
            })
            .collect()
    }

    /// Symmetric adjacency of the whole lattice
    ///
    /// # Errors
    ///
    /// Never fails for a validated lattice; insertion errors are propagated
    pub fn adjacency(&self) -> Result<Adjacency> {
        let mut adjacency = Adjacency::new(self.len());
        for cell in 0..self.len() {
            for candidate in self.neighbor_candidates(cell) {
                adjacency.connect(cell, candidate)?;
            }
        }
        Ok(adjacency)
    }

    /// Generate a typed mesh over this lattice
    ///
    /// # Errors
    ///
    /// Propagates errors from building the adjacency
    pub fn generate<R: Rng + ?Sized>(&self, pattern: Pattern, rng: &mut R) -> Result<LatticeMesh> {
        let types = (0..self.len())
            .map(|cell| {
                pattern.type_at(
                    cell % self.columns,
                    cell / self.columns,
                    self.columns,
                    self.rows,
                    rng,
                )
            })
            .collect();
        let polygons = (0..self.len()).map(|cell| self.hexagon(cell)).collect();
        let table = CellTable::new(types)
            .with_polygons(polygons)?
            .with_adjacency(self.adjacency()?)?;

        debug!(
            columns = self.columns,
            rows = self.rows,
            ?pattern,
            "generated hexagonal lattice"
        );
        Ok(LatticeMesh {
            lattice: *self,
            pattern,
            table,
        })
    }
}

/// Mesh produced by the lattice generator
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeMesh {
    lattice: HexLattice,
    pattern: Pattern,
    table: CellTable,
}

impl LatticeMesh {
    /// Lattice geometry
    pub const fn lattice(&self) -> &HexLattice {
        &self.lattice
    }

    /// Pattern the types were assigned with
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Underlying cell table
    pub const fn table(&self) -> &CellTable {
        &self.table
    }

    /// Export the mesh as an interchange document
    ///
    /// # Errors
    ///
    /// Never fails for a generated lattice; kept fallible to match the other variants
    pub fn to_document(&self) -> Result<MeshDocument> {
        self.table.to_document()
    }
}

impl Mesh for LatticeMesh {
    fn len(&self) -> usize {
        self.table.len()
    }

    fn type_of(&self, cell: usize) -> Result<CellType> {
        self.table.type_of(cell)
    }

    fn neighbors(&self, cell: usize) -> Result<&[usize]> {
        self.table.neighbors(cell)
    }

    fn polygon(&self, cell: usize) -> Result<Option<&Polygon>> {
        self.table.polygon(cell)
    }
}
