//! Type demographics, neighbor-type transition statistics and order-1 entropy

use crate::io::error::{Result, degenerate_distribution};
use crate::math::is_distribution;
use crate::math::probability::{Distribution, shannon_entropy};
use crate::math::sparse::SparseMap;
use crate::mesh::{CellType, Mesh};
use ndarray::{Array1, Array2, ArrayView1};
use tracing::debug;

/// Marginal distribution of cell types
///
/// Types are kept in ascending order; that order indexes the probability
/// vector and the rows and columns of `NeighborStats`.
#[derive(Debug, Clone, PartialEq)]
pub struct Demographics {
    types: Vec<CellType>,
    probabilities: Array1<f64>,
}

impl Demographics {
    /// Compute the fraction of cells of each type
    ///
    /// # Errors
    ///
    /// Returns `DegenerateDistribution` if the fractions fail the sum check,
    /// which includes the empty mesh
    pub fn from_mesh<M: Mesh + ?Sized>(mesh: &M) -> Result<Self> {
        let mut counts = SparseMap::<CellType, usize>::default();
        for cell in 0..mesh.len() {
            counts.increment(mesh.type_of(cell)?);
        }

        let total = mesh.len() as f64;
        let types: Vec<CellType> = counts.keys().copied().collect();
        let probabilities: Array1<f64> = counts
            .values()
            .map(|&count| count as f64 / total)
            .collect();

        if !is_distribution(probabilities.iter()) {
            return Err(degenerate_distribution(
                "demographics",
                &format!(
                    "probabilities over {} cells sum to {}",
                    mesh.len(),
                    probabilities.sum()
                ),
            ));
        }
        Ok(Self {
            types,
            probabilities,
        })
    }

    /// Distinct types in ascending order
    pub fn types(&self) -> &[CellType] {
        &self.types
    }

    /// Probabilities in type order
    pub const fn probabilities(&self) -> &Array1<f64> {
        &self.probabilities
    }

    /// Position of a type in the canonical order
    pub fn index_of(&self, cell_type: CellType) -> Option<usize> {
        self.types.binary_search(&cell_type).ok()
    }

    /// Probability of a type, 0 for types absent from the mesh
    pub fn probability(&self, cell_type: CellType) -> f64 {
        self.index_of(cell_type)
            .and_then(|index| self.probabilities.get(index).copied())
            .unwrap_or(0.0)
    }

    /// Number of distinct types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check whether no types are present
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Demographics as a keyed distribution
    pub fn to_distribution(&self) -> Distribution<CellType> {
        Distribution::from_validated(
            self.types
                .iter()
                .copied()
                .zip(self.probabilities.iter().copied())
                .collect(),
        )
    }
}

/// Row-stochastic matrix of neighbor-type transitions
///
/// Entry `[i, j]` is the fraction of adjacency edges leaving cells of type
/// `types[i]` that arrive at cells of type `types[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborStats {
    types: Vec<CellType>,
    matrix: Array2<f64>,
}

impl NeighborStats {
    /// Tally adjacency edges by the types at both ends
    ///
    /// # Errors
    ///
    /// Returns `DegenerateDistribution` if some type has no outgoing edges or
    /// a row fails the sum check, and propagates mesh contract errors
    pub fn from_mesh<M: Mesh + ?Sized>(mesh: &M) -> Result<Self> {
        let mut transitions = SparseMap::<(CellType, CellType), usize>::default();
        let mut outgoing = SparseMap::<CellType, usize>::default();
        let mut present = SparseMap::<CellType, usize>::default();

        for cell in 0..mesh.len() {
            let from = mesh.type_of(cell)?;
            present.increment(from);
            for &neighbor in mesh.neighbors(cell)? {
                let to = mesh.type_of(neighbor)?;
                transitions.increment((from, to));
                outgoing.increment(from);
            }
        }

        let types: Vec<CellType> = present.keys().copied().collect();
        let k = types.len();
        let mut matrix = Array2::<f64>::zeros((k, k));

        for (i, &from) in types.iter().enumerate() {
            let total = *outgoing.get(&from);
            if total == 0 {
                return Err(degenerate_distribution(
                    "neighbor",
                    &format!("type {from} has no outgoing adjacency edges"),
                ));
            }
            for (j, &to) in types.iter().enumerate() {
                if let Some(entry) = matrix.get_mut([i, j]) {
                    *entry = *transitions.get(&(from, to)) as f64 / total as f64;
                }
            }
            if !is_distribution(matrix.row(i).iter()) {
                return Err(degenerate_distribution(
                    "neighbor",
                    &format!("row for type {from} sums to {}", matrix.row(i).sum()),
                ));
            }
        }

        debug!(types = k, edges = outgoing.total(), "computed neighbor statistics");
        Ok(Self { types, matrix })
    }

    /// Distinct types in ascending order, indexing rows and columns
    pub fn types(&self) -> &[CellType] {
        &self.types
    }

    /// Transition matrix
    pub const fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Transition probabilities out of one type
    pub fn row(&self, cell_type: CellType) -> Option<ArrayView1<'_, f64>> {
        let index = self.types.binary_search(&cell_type).ok()?;
        Some(self.matrix.row(index))
    }

    /// Probability that a neighbor of a `from` cell has type `to`
    pub fn probability(&self, from: CellType, to: CellType) -> f64 {
        let (Ok(i), Ok(j)) = (
            self.types.binary_search(&from),
            self.types.binary_search(&to),
        ) else {
            return 0.0;
        };
        self.matrix.get([i, j]).copied().unwrap_or(0.0)
    }
}

/// Order-1 spatial entropy from demographics and neighbor statistics
///
/// Shannon entropy of the products `demographics[i] * neighbor[i, j]` over
/// every type pair, zero products contributing nothing.
pub fn order_one_entropy(demographics: &Demographics, neighbors: &NeighborStats) -> f64 {
    let terms = demographics
        .types()
        .iter()
        .enumerate()
        .flat_map(|(i, &from)| {
            let p_from = demographics.probabilities().get(i).copied().unwrap_or(0.0);
            demographics
                .types()
                .iter()
                .map(move |&to| p_from * neighbors.probability(from, to))
        });
    shannon_entropy(terms)
}

/// Order-1 spatial entropy of a mesh
///
/// # Errors
///
/// Returns any error from `Demographics::from_mesh` or `NeighborStats::from_mesh`
pub fn spatial_entropy<M: Mesh + ?Sized>(mesh: &M) -> Result<f64> {
    let demographics = Demographics::from_mesh(mesh)?;
    let neighbors = NeighborStats::from_mesh(mesh)?;
    Ok(order_one_entropy(&demographics, &neighbors))
}
