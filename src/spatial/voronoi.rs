//! Voronoi tessellation meshes built from labeled cell centroids
//!
//! The Delaunay triangulation of the centroids is dualized into one Voronoi
//! polygon per distinct site. Unbounded cells and cells with a vertex outside
//! the bounding box of the centroids are discarded, and the survivors are
//! re-indexed densely in input order. Two surviving cells are adjacent when
//! exactly two polygons share an edge.

use crate::io::error::{AnalysisError, Result};
use crate::mesh::{Adjacency, CellTable, CellType, Mesh, MeshDocument, Point, Polygon};
use ordered_float::OrderedFloat;
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::BTreeMap;
use tracing::debug;

/// Cell centroid with its type label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint {
    /// Centroid position
    pub centroid: Point,
    /// Type label
    pub cell_type: CellType,
}

impl LabeledPoint {
    /// Create a labeled point
    pub const fn new(x: f64, y: f64, cell_type: CellType) -> Self {
        Self {
            centroid: [x, y],
            cell_type,
        }
    }
}

type Vertex = (OrderedFloat<f64>, OrderedFloat<f64>);

/// Orientation-free key of a polygon edge
fn edge_key(a: Point, b: Point) -> (Vertex, Vertex) {
    let a = (OrderedFloat(a[0]), OrderedFloat(a[1]));
    let b = (OrderedFloat(b[0]), OrderedFloat(b[1]));
    if a <= b { (a, b) } else { (b, a) }
}

/// Axis-aligned bounds of the input centroids
#[derive(Clone, Copy)]
struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    fn of(points: &[LabeledPoint]) -> Option<Self> {
        let first = points.first()?.centroid;
        Some(points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, point| {
                let [x, y] = point.centroid;
                Self {
                    min: [bounds.min[0].min(x), bounds.min[1].min(y)],
                    max: [bounds.max[0].max(x), bounds.max[1].max(y)],
                }
            },
        ))
    }

    // Boundary counts as inside
    fn contains(&self, [x, y]: Point) -> bool {
        x >= self.min[0] && x <= self.max[0] && y >= self.min[1] && y <= self.max[1]
    }
}

/// Mesh of bounded Voronoi cells
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiMesh {
    centroids: Vec<Point>,
    table: CellTable,
    discarded: usize,
}

impl VoronoiMesh {
    /// Tessellate labeled centroids
    ///
    /// Points at identical positions collapse into one site carrying the
    /// last label given. Fewer than three non-collinear points produce an
    /// empty mesh because no Voronoi cell is bounded.
    ///
    /// # Errors
    ///
    /// Returns `Geometry` if a coordinate is not finite or cannot be
    /// triangulated
    pub fn build(points: &[LabeledPoint]) -> Result<Self> {
        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        let mut sites: Vec<LabeledPoint> = Vec::with_capacity(points.len());

        for point in points {
            let [x, y] = point.centroid;
            if !x.is_finite() || !y.is_finite() {
                return Err(AnalysisError::Geometry {
                    reason: format!("centroid ({x}, {y}) is not finite"),
                });
            }
            let handle = triangulation
                .insert(Point2::new(x, y))
                .map_err(|error| AnalysisError::Geometry {
                    reason: format!("cannot triangulate ({x}, {y}): {error}"),
                })?;
            match sites.get_mut(handle.index()) {
                Some(site) => site.cell_type = point.cell_type,
                None => sites.push(*point),
            }
        }

        let mut centroids = Vec::new();
        let mut types = Vec::new();
        let mut polygons = Vec::new();
        let bounds = Bounds::of(points).filter(|_| triangulation.num_inner_faces() > 0);
        if let Some(bounds) = bounds {
            for vertex in triangulation.vertices() {
                let Some(site) = sites.get(vertex.fix().index()) else {
                    continue;
                };
                let Some(polygon) = bounded_polygon(
                    vertex
                        .as_voronoi_face()
                        .adjacent_edges()
                        .map(|edge| edge.from().position().map(|p| [p.x, p.y])),
                ) else {
                    continue;
                };
                if polygon.iter().all(|&corner| bounds.contains(corner)) {
                    centroids.push(site.centroid);
                    types.push(site.cell_type);
                    polygons.push(polygon);
                }
            }
        }

        let adjacency = shared_edge_adjacency(&polygons)?;
        let discarded = points.len() - centroids.len();
        debug!(
            points = points.len(),
            cells = centroids.len(),
            discarded,
            edges = adjacency.edge_count(),
            "built voronoi mesh"
        );

        Ok(Self {
            centroids,
            table: CellTable::new(types)
                .with_polygons(polygons)?
                .with_adjacency(adjacency)?,
            discarded,
        })
    }

    /// Centroids of the surviving cells, in cell order
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Number of input points that did not become a cell
    pub const fn discarded(&self) -> usize {
        self.discarded
    }

    /// Underlying cell table
    pub const fn table(&self) -> &CellTable {
        &self.table
    }

    /// Export the mesh as an interchange document
    ///
    /// # Errors
    ///
    /// Never fails for a built mesh; kept fallible to match the other variants
    pub fn to_document(&self) -> Result<MeshDocument> {
        self.table.to_document()
    }
}

/// Polygon from its vertices, or `None` if any vertex is at infinity
///
/// Consecutive repeated vertices, from degenerate zero-length Voronoi edges,
/// are merged. Polygons left with fewer than three vertices are rejected.
fn bounded_polygon<I: IntoIterator<Item = Option<Point>>>(vertices: I) -> Option<Polygon> {
    let mut polygon: Polygon = Vec::new();
    for vertex in vertices {
        let vertex = vertex?;
        if polygon.last() != Some(&vertex) {
            polygon.push(vertex);
        }
    }
    if polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    (polygon.len() >= 3).then_some(polygon)
}

/// Connect every pair of polygons sharing exactly one edge between them
fn shared_edge_adjacency(polygons: &[Polygon]) -> Result<Adjacency> {
    let mut owners: BTreeMap<(Vertex, Vertex), Vec<usize>> = BTreeMap::new();
    for (cell, polygon) in polygons.iter().enumerate() {
        let closing = polygon.last().into_iter().zip(polygon.first());
        for (&a, &b) in polygon
            .iter()
            .zip(polygon.iter().skip(1))
            .chain(closing)
        {
            owners.entry(edge_key(a, b)).or_default().push(cell);
        }
    }

    let mut adjacency = Adjacency::new(polygons.len());
    for cells in owners.values() {
        if let [a, b] = cells.as_slice()
            && a != b
        {
            adjacency.connect(*a, *b)?;
        }
    }
    Ok(adjacency)
}

impl Mesh for VoronoiMesh {
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
