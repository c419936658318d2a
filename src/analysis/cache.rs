use crate::algorithm::clusters::{Cluster, ClusterSizes, find_clusters};
use crate::analysis::statistics::{Demographics, NeighborStats, order_one_entropy};
use crate::io::error::Result;
use crate::mesh::Mesh;
use std::cell::{Cell, OnceCell};

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

/// Memoized derived properties of one mesh
///
/// Each property is computed on first request and then reused for the
/// lifetime of the analysis. Failures are not stored: a failing statistic
/// reports its error again on the next request and leaves the other
/// properties usable. The cache is single-threaded (`!Sync`).
pub struct MeshAnalysis<'m, M: ?Sized> {
    mesh: &'m M,
    demographics: OnceCell<Demographics>,
    neighbor_stats: OnceCell<NeighborStats>,
    entropy: OnceCell<f64>,
    clusters: OnceCell<Vec<Cluster>>,
    cluster_sizes: OnceCell<ClusterSizes>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<'m, M: Mesh + ?Sized> MeshAnalysis<'m, M> {
    /// Create an empty cache over a mesh
    pub const fn new(mesh: &'m M) -> Self {
        Self {
            mesh,
            demographics: OnceCell::new(),
            neighbor_stats: OnceCell::new(),
            entropy: OnceCell::new(),
            clusters: OnceCell::new(),
            cluster_sizes: OnceCell::new(),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// The analyzed mesh
    pub const fn mesh(&self) -> &'m M {
        self.mesh
    }

    /// Type demographics
    ///
    /// # Errors
    ///
    /// Returns any error from `Demographics::from_mesh`
    pub fn demographics(&self) -> Result<&Demographics> {
        self.get_or_compute(&self.demographics, || Demographics::from_mesh(self.mesh))
    }

    /// Neighbor-type transition statistics
    ///
    /// # Errors
    ///
    /// Returns any error from `NeighborStats::from_mesh`
    pub fn neighbor_stats(&self) -> Result<&NeighborStats> {
        self.get_or_compute(&self.neighbor_stats, || NeighborStats::from_mesh(self.mesh))
    }

    /// Order-1 spatial entropy
    ///
    /// # Errors
    ///
    /// Returns any error from the demographics or neighbor statistics
    pub fn entropy(&self) -> Result<f64> {
        self.get_or_compute(&self.entropy, || {
            Ok(order_one_entropy(self.demographics()?, self.neighbor_stats()?))
        })
        .copied()
    }

    /// Same-type clusters
    ///
    /// # Errors
    ///
    /// Returns any error from `find_clusters`
    pub fn clusters(&self) -> Result<&[Cluster]> {
        self.get_or_compute(&self.clusters, || find_clusters(self.mesh))
            .map(Vec::as_slice)
    }

    /// Cluster sizes grouped by type
    ///
    /// # Errors
    ///
    /// Returns any error from `find_clusters`
    pub fn cluster_sizes(&self) -> Result<&ClusterSizes> {
        self.get_or_compute(&self.cluster_sizes, || {
            Ok(ClusterSizes::from_clusters(self.clusters()?))
        })
    }

    /// Cache hit and miss counts so far
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }

    /// Retrieve a cached property or compute and store it
    ///
    /// Only successful results are stored.
    fn get_or_compute<'a, T, F>(&self, slot: &'a OnceCell<T>, compute: F) -> Result<&'a T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = slot.get() {
            self.hits.set(self.hits.get() + 1);
            return Ok(value);
        }
        self.misses.set(self.misses.get() + 1);
        let value = compute()?;
        Ok(slot.get_or_init(|| value))
    }
}
