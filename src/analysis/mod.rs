//! Statistical analysis of cell types over the mesh adjacency

/// Memoized per-mesh derived properties
pub mod cache;
/// Path colours and higher-order path entropy
pub mod paths;
/// Demographics, neighbor statistics and order-1 entropy
pub mod statistics;
