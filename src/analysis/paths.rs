//! Higher-order spatial entropy over the colours of self-avoiding walks

use crate::algorithm::walks::self_avoiding_walks;
use crate::io::error::Result;
use crate::math::probability::Distribution;
use crate::math::sparse::SparseMap;
use crate::mesh::{CellType, Mesh};
use tracing::debug;

/// Colour of a walk: the types of its cells in visiting order
///
/// # Errors
///
/// Returns `OutOfRange` if the walk contains an invalid cell
pub fn colour<M: Mesh + ?Sized>(mesh: &M, walk: &[usize]) -> Result<Vec<CellType>> {
    walk.iter().map(|&cell| mesh.type_of(cell)).collect()
}

/// Empirical distribution of walk colours for walks of `length` cells
///
/// # Errors
///
/// Returns `InvalidParameter` for a zero length, `DegenerateDistribution`
/// when the mesh has no walk of that length, and mesh contract errors
pub fn path_distribution<M: Mesh + ?Sized>(
    mesh: &M,
    length: usize,
) -> Result<Distribution<Vec<CellType>>> {
    let mut counts = SparseMap::<Vec<CellType>, usize>::default();
    for walk in self_avoiding_walks(mesh, length)? {
        counts.increment(colour(mesh, &walk?)?);
    }
    debug!(
        length,
        walks = counts.total(),
        colours = counts.len(),
        "enumerated self-avoiding walks"
    );
    Distribution::from_counts(&counts)
}

/// Shannon entropy of the walk colour distribution
///
/// # Errors
///
/// Returns any error from `path_distribution`
pub fn path_entropy<M: Mesh + ?Sized>(mesh: &M, length: usize) -> Result<f64> {
    Ok(path_distribution(mesh, length)?.entropy())
}

/// Relative entropy between the walk colour distributions of two meshes
///
/// # Errors
///
/// Returns `DivergenceUndefined` if `mesh` has a colour that `reference`
/// lacks, otherwise any error from `path_distribution`
pub fn relative_path_entropy<M, R>(mesh: &M, reference: &R, length: usize) -> Result<f64>
where
    M: Mesh + ?Sized,
    R: Mesh + ?Sized,
{
    let distribution = path_distribution(mesh, length)?;
    let reference_distribution = path_distribution(reference, length)?;
    distribution.relative_entropy(&reference_distribution)
}
