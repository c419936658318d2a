//! Geometric mesh builders
//!
//! This module contains the builders that derive cell geometry and adjacency
//! from coordinates:
//! - Synthetic hexagonal lattices with patterned types
//! - Voronoi tessellations of labeled centroids

/// Hexagonal lattice generator
pub mod lattice;
/// Voronoi tessellation of labeled centroids
pub mod voronoi;

pub use lattice::{HexLattice, LatticeMesh, Pattern};
pub use voronoi::{LabeledPoint, VoronoiMesh};
