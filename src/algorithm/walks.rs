//! Lazy enumeration of self-avoiding walks over a mesh adjacency

use crate::algorithm::bitset::CellSet;
use crate::io::error::{Result, invalid_parameter};
use crate::mesh::Mesh;

/// Iterator over every self-avoiding walk of a fixed number of cells
///
/// Walks start at each cell in index order and follow neighbors in their
/// stored order. A walk never visits a cell twice. The enumeration is
/// depth-first with an explicit stack, so memory is bounded by the walk
/// length rather than the number of walks.
pub struct SelfAvoidingWalks<'m, M: ?Sized> {
    mesh: &'m M,
    length: usize,
    next_start: usize,
    path: Vec<usize>,
    cursors: Vec<usize>,
    on_path: CellSet,
    failed: bool,
}

/// Enumerate all self-avoiding walks of exactly `length` cells
///
/// # Errors
///
/// Returns `InvalidParameter` if `length` is zero
pub fn self_avoiding_walks<M: Mesh + ?Sized>(
    mesh: &M,
    length: usize,
) -> Result<SelfAvoidingWalks<'_, M>> {
    if length == 0 {
        return Err(invalid_parameter(
            "length",
            &length,
            &"walks must contain at least one cell",
        ));
    }
    Ok(SelfAvoidingWalks {
        mesh,
        length,
        next_start: 0,
        path: Vec::with_capacity(length),
        cursors: Vec::with_capacity(length),
        on_path: CellSet::new(mesh.len()),
        failed: false,
    })
}

impl<M: Mesh + ?Sized> SelfAvoidingWalks<'_, M> {
    fn push(&mut self, cell: usize) {
        self.path.push(cell);
        self.cursors.push(0);
        self.on_path.insert(cell);
    }

    fn pop(&mut self) {
        if let Some(cell) = self.path.pop() {
            self.on_path.remove(cell);
        }
        self.cursors.pop();
    }
}

impl<M: Mesh + ?Sized> Iterator for SelfAvoidingWalks<'_, M> {
    type Item = Result<Vec<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.mesh;
        loop {
            if self.failed {
                return None;
            }

            let Some(&tip) = self.path.last() else {
                if self.next_start >= mesh.len() {
                    return None;
                }
                let start = self.next_start;
                self.next_start += 1;
                self.push(start);
                continue;
            };

            if self.path.len() == self.length {
                let walk = self.path.clone();
                self.pop();
                return Some(Ok(walk));
            }

            let neighbors = match mesh.neighbors(tip) {
                Ok(neighbors) => neighbors,
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            };

            let mut extension = None;
            if let Some(cursor) = self.cursors.last_mut() {
                while let Some(&candidate) = neighbors.get(*cursor) {
                    *cursor += 1;
                    if !self.on_path.contains(candidate) {
                        extension = Some(candidate);
                        break;
                    }
                }
            }

            match extension {
                Some(cell) => self.push(cell),
                None => self.pop(),
            }
        }
    }
}
