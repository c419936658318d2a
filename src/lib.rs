//! Spatial statistics for cellular-tissue meshes
//!
//! A mesh is a set of polygonal cells, each labeled with a discrete type and
//! linked to its neighbors by a symmetric adjacency relation. Meshes come from
//! simulation grids, Voronoi tessellations of scattered centroids, synthetic
//! hexagonal lattices or JSON interchange documents. On top of the shared
//! `Mesh` trait the crate detects same-type clusters and computes type
//! demographics, neighbor statistics and path-based entropies.

#![forbid(unsafe_code)]

/// Traversal algorithms: clustering, self-avoiding walks and visited sets
pub mod algorithm;
/// Statistics over cell types and their adjacency
pub mod analysis;
/// Input/output, command-line handling and error types
pub mod io;
/// Probability distributions, entropy and sparse counters
pub mod math;
/// Mesh model, adjacency relation and interchange format
pub mod mesh;
/// Geometric builders for lattice and Voronoi meshes
pub mod spatial;

pub use io::error::{AnalysisError, Result};
pub use mesh::Mesh;
