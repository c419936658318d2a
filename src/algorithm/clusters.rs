//! Partition of a mesh into maximal connected same-type clusters

use crate::algorithm::bitset::CellSet;
use crate::io::error::Result;
use crate::mesh::{CellType, Mesh};
use ndarray::Array1;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Maximal connected set of cells sharing one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    cell_type: CellType,
    members: Vec<usize>,
}

impl Cluster {
    /// Type shared by every member
    pub const fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Member cells in ascending order
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of member cells
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Clusters always hold their seed, so this is false for detected clusters
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Test cell membership
    pub fn contains(&self, cell: usize) -> bool {
        self.members.binary_search(&cell).is_ok()
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cluster({}, {:?})", self.cell_type, self.members)
    }
}

/// Find every cluster of the mesh
///
/// Cells are seeded in index order, so clusters come out ordered by their
/// smallest member. Traversal uses an explicit stack and a visited set; the
/// partition does not depend on the order neighbors are visited in.
///
/// # Errors
///
/// Propagates `MissingData` when the mesh has no adjacency and `OutOfRange`
/// when the adjacency references a cell outside the mesh
pub fn find_clusters<M: Mesh + ?Sized>(mesh: &M) -> Result<Vec<Cluster>> {
    let mut assigned = CellSet::new(mesh.len());
    let mut clusters = Vec::new();

    for seed in 0..mesh.len() {
        if assigned.contains(seed) {
            continue;
        }
        clusters.push(explore_cluster(mesh, seed, &mut assigned)?);
    }

    debug!(
        cells = mesh.len(),
        assigned = assigned.count(),
        clusters = clusters.len(),
        "partitioned mesh into clusters"
    );
    Ok(clusters)
}

/// Collect the cluster containing `seed`, marking its cells as assigned
fn explore_cluster<M: Mesh + ?Sized>(
    mesh: &M,
    seed: usize,
    assigned: &mut CellSet,
) -> Result<Cluster> {
    let cell_type = mesh.type_of(seed)?;
    let mut members = vec![seed];
    let mut stack = vec![seed];
    assigned.insert(seed);

    while let Some(cell) = stack.pop() {
        for &neighbor in mesh.neighbors(cell)? {
            if assigned.contains(neighbor) {
                continue;
            }
            if mesh.type_of(neighbor)? == cell_type {
                assigned.insert(neighbor);
                members.push(neighbor);
                stack.push(neighbor);
            }
        }
    }

    members.sort_unstable();
    Ok(Cluster { cell_type, members })
}

/// Mean and spread of the cluster sizes of one type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSizeSummary {
    /// Cell type the clusters share
    pub cell_type: CellType,
    /// Number of clusters of this type
    pub clusters: usize,
    /// Mean cluster size
    pub mean: f64,
    /// Population standard deviation of the cluster sizes
    pub std_dev: f64,
}

/// Cluster sizes grouped by type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSizes {
    sizes: BTreeMap<CellType, Vec<usize>>,
}

impl ClusterSizes {
    /// Group the sizes of detected clusters by their type
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        let mut sizes: BTreeMap<CellType, Vec<usize>> = BTreeMap::new();
        for cluster in clusters {
            sizes
                .entry(cluster.cell_type())
                .or_default()
                .push(cluster.len());
        }
        Self { sizes }
    }

    /// Sizes of the clusters of one type, in detection order
    pub fn sizes(&self, cell_type: CellType) -> &[usize] {
        self.sizes.get(&cell_type).map(Vec::as_slice).unwrap_or_default()
    }

    /// Types that have at least one cluster, ascending
    pub fn types(&self) -> impl Iterator<Item = CellType> + '_ {
        self.sizes.keys().copied()
    }

    /// Per-type mean and standard deviation, ascending by type
    pub fn summary(&self) -> Vec<ClusterSizeSummary> {
        self.sizes
            .iter()
            .map(|(&cell_type, sizes)| {
                let values: Array1<f64> = sizes.iter().map(|&size| size as f64).collect();
                ClusterSizeSummary {
                    cell_type,
                    clusters: sizes.len(),
                    mean: values.mean().unwrap_or(0.0),
                    std_dev: values.std(0.0),
                }
            })
            .collect()
    }
}
