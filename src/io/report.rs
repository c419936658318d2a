//! Per-mesh summary lines written by the batch driver

use crate::algorithm::clusters::ClusterSizeSummary;
use crate::analysis::cache::MeshAnalysis;
use crate::io::error::Result;
use crate::mesh::Mesh;
use std::fmt;

/// Spatial entropy and cluster-size summary of one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    /// Label of the mesh, usually its file name
    pub name: String,
    /// Order-1 spatial entropy
    pub entropy: f64,
    /// Cluster-size mean and spread per type, ascending by type
    pub clusters: Vec<ClusterSizeSummary>,
}

impl MeshReport {
    /// Collect the reported statistics from a mesh analysis
    ///
    /// # Errors
    ///
    /// Returns any error from the entropy or cluster computations
    pub fn from_analysis<M: Mesh + ?Sized>(
        name: impl Into<String>,
        analysis: &MeshAnalysis<'_, M>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            entropy: analysis.entropy()?,
            clusters: analysis.cluster_sizes()?.summary(),
        })
    }
}

/// Tab-separated `name, entropy, (mean, std)*`
///
/// Entropy is written at full precision, cluster statistics with six decimals.
impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{:?}", self.name, self.entropy)?;
        for summary in &self.clusters {
            write!(f, "\t{:.6}\t{:.6}", summary.mean, summary.std_dev)?;
        }
        Ok(())
    }
}
