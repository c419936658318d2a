//! Interchange document format shared by the Voronoi and lattice builders
//!
//! A document is a JSON object with exactly four fields:
//!
//! ```json
//! {
//!   "types": [0, 1, 1],
//!   "polygons": [[[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]], ...],
//!   "adjacencies": [[0, 1], [1, 0], [1, 2], [2, 1]],
//!   "shape": [3, 3]
//! }
//! ```
//!
//! `polygons` may be omitted or `null`. Adjacency pairs list both directions
//! explicitly; loading never symmetrizes them.

use crate::io::error::{Result, WithContext, invalid_document};
use crate::mesh::{Adjacency, CellTable, CellType, Mesh, Polygon, integral_label};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Serialized form of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshDocument {
    /// Type label of every cell, in index order
    ///
    /// Integral floats such as `1.0` are accepted as labels.
    #[serde(deserialize_with = "deserialize_labels")]
    pub types: Vec<CellType>,
    /// Boundary polygon of every cell, when the source has geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygons: Option<Vec<Polygon>>,
    /// Directed adjacency pairs, both directions listed
    pub adjacencies: Vec<(usize, usize)>,
    /// Adjacency matrix shape, always `(n, n)`
    pub shape: (usize, usize),
}

/// Label as written in a document
#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Integer(CellType),
    Real(f64),
}

fn deserialize_labels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<CellType>, D::Error> {
    Vec::<Label>::deserialize(deserializer)?
        .into_iter()
        .enumerate()
        .map(|(cell, label)| match label {
            Label::Integer(value) => Ok(value),
            Label::Real(value) => integral_label(value).ok_or_else(|| {
                <D::Error as serde::de::Error>::custom(format!(
                    "cell {cell} has non-integral type label {value}"
                ))
            }),
        })
        .collect()
}

impl MeshDocument {
    /// Parse and validate a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed JSON, unknown or missing fields and
    /// mistyped values, and `InvalidDocument` for structural violations
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Read, parse and validate a document file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read, otherwise as `from_json_str`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_operation(path, "read")?;
        Self::from_json_str(&text).with_path(path)
    }

    /// Serialize the document to JSON text
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the document to a file
    ///
    /// # Errors
    ///
    /// Returns `Json` or `FileSystem` on failure
    pub fn write_json_file(&self, path: &Path) -> Result<()> {
        let text = self.to_json_string().with_path(path)?;
        std::fs::write(path, text).with_operation(path, "write")
    }

    /// Number of cells described by the document
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check whether the document describes no cells
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check structural consistency of the document
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` if the shape is not `(n, n)`, the polygon
    /// count is not `n`, a pair references a cell outside `[0, n)`, or a pair
    /// is listed without its reverse
    pub fn validate(&self) -> Result<()> {
        self.adjacency().map(|_| ())
    }

    /// Rebuild the adjacency relation from the listed pairs
    fn adjacency(&self) -> Result<Adjacency> {
        let n = self.len();
        if self.shape != (n, n) {
            return Err(invalid_document(&format!(
                "shape ({}, {}) does not match {n} cells",
                self.shape.0, self.shape.1
            )));
        }
        if let Some(polygons) = &self.polygons {
            if polygons.len() != n {
                return Err(invalid_document(&format!(
                    "{} polygons for {n} cells",
                    polygons.len()
                )));
            }
        }

        let mut adjacency = Adjacency::new(n);
        for &(from, to) in &self.adjacencies {
            if from >= n || to >= n {
                return Err(invalid_document(&format!(
                    "adjacency ({from}, {to}) references a cell outside 0..{n}"
                )));
            }
            adjacency.insert(from, to)?;
        }
        if let Some((from, to)) = adjacency.find_asymmetry() {
            return Err(invalid_document(&format!(
                "adjacency ({from}, {to}) is listed without ({to}, {from})"
            )));
        }
        Ok(adjacency)
    }
}

/// Mesh reconstructed from an interchange document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMesh {
    table: CellTable,
}

impl DocumentMesh {
    /// Build a mesh from a document, validating it first
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` if validation fails
    pub fn from_document(document: MeshDocument) -> Result<Self> {
        let adjacency = document.adjacency()?;
        let mut table = CellTable::new(document.types);
        if let Some(polygons) = document.polygons {
            table = table.with_polygons(polygons)?;
        }
        Ok(Self {
            table: table.with_adjacency(adjacency)?,
        })
    }

    /// Load a mesh from a document file
    ///
    /// # Errors
    ///
    /// Returns any error from reading, parsing or validating the file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        Self::from_document(MeshDocument::from_json_file(path)?).with_path(path)
    }

    /// Underlying cell table
    pub const fn table(&self) -> &CellTable {
        &self.table
    }

    /// Export the mesh back to a document
    ///
    /// # Errors
    ///
    /// Never fails for a loaded mesh; kept fallible to match the other variants
    pub fn to_document(&self) -> Result<MeshDocument> {
        self.table.to_document()
    }
}

impl Mesh for DocumentMesh {
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
