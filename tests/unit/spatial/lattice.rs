//! Tests for hexagonal lattice geometry, connectivity and patterns

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tissue_analysis::{AnalysisError, Mesh};
    use tissue_analysis::algorithm::clusters::find_clusters;
    use tissue_analysis::spatial::LatticeMesh;
    use tissue_analysis::spatial::lattice::{HexLattice, Pattern, apothem, circumradius};

    fn generate(columns: usize, rows: usize, pattern: Pattern) -> LatticeMesh {
        HexLattice::new(columns, rows)
            .expect("lattice")
            .generate(pattern, &mut StdRng::seed_from_u64(11))
            .expect("mesh")
    }

    fn shoelace_area(polygon: &[[f64; 2]]) -> f64 {
        let n = polygon.len();
        (0..n)
            .map(|i| {
                let [x0, y0] = polygon[i];
                let [x1, y1] = polygon[(i + 1) % n];
                x0.mul_add(y1, -(x1 * y0))
            })
            .sum::<f64>()
            .abs()
            / 2.0
    }

    // Tests a single-cell lattice has one hexagon and no neighbors
    // Verified by adding the cell as its own neighbor
    #[test]
    fn test_single_cell() {
        let mesh = generate(1, 1, Pattern::Stripes);
        assert_eq!(mesh.len(), 1);
        assert!(mesh.neighbors(0).expect("neighbors").is_empty());
        let hexagon = mesh.polygon(0).expect("polygon").expect("geometry");
        assert_eq!(hexagon.len(), 6);
    }

    // Tests hexagons have unit area
    // Verified by using the apothem as the circumradius
    #[test]
    fn test_unit_area() {
        let lattice = HexLattice::new(3, 3).expect("lattice");
        assert!((shoelace_area(&lattice.hexagon(4)) - 1.0).abs() < 1e-9);
        assert!((apothem() - circumradius() * 3.0_f64.sqrt() / 2.0).abs() < 1e-12);
    }

    // Tests cell centers follow the staggered row layout
    // Verified by shifting even rows instead of odd rows
    #[test]
    fn test_centers() {
        let lattice = HexLattice::new(2, 2).expect("lattice");
        let big = circumradius();
        assert_eq!(lattice.center(0), [0.0, 0.0]);
        let [x1, y1] = lattice.center(1);
        assert!((x1 - 3.0 * big).abs() < 1e-12 && y1.abs() < 1e-12);
        let [x2, y2] = lattice.center(2);
        assert!((x2 - 1.5 * big).abs() < 1e-12 && (y2 - apothem()).abs() < 1e-12);
    }

    // Tests neighboring hexagon centers are one apothem pair apart
    // Verified by accepting diagonal candidates across row ends
    #[test]
    fn test_neighbors_are_touching() {
        let lattice = HexLattice::new(5, 6).expect("lattice");
        let adjacency = lattice.adjacency().expect("adjacency");
        for (a, b) in adjacency.pairs() {
            let [xa, ya] = lattice.center(a);
            let [xb, yb] = lattice.center(b);
            let distance = (xa - xb).hypot(ya - yb);
            assert!((distance - 2.0 * apothem()).abs() < 1e-9, "{a} and {b} are {distance} apart");
        }
        assert!(adjacency.is_symmetric());
    }

    // Tests interior cells have six neighbors and row ends do not wrap
    // Verified by dropping the left-side column check
    #[test]
    fn test_neighbor_counts() {
        let lattice = HexLattice::new(4, 6).expect("lattice");
        let adjacency = lattice.adjacency().expect("adjacency");
        // Row 2, column 1
        assert_eq!(adjacency.neighbors(9).expect("neighbors").len(), 6);
        // Row 2, column 0 has no left diagonals
        assert_eq!(adjacency.neighbors(8).expect("neighbors"), &[0, 4, 12, 16]);
        assert_eq!(lattice.neighbor_candidates(8), vec![0, 16, 4, 12]);
    }

    // Tests a 2x2 checkerboard splits into two clusters
    // Verified by assigning checkerboard types by row
    #[test]
    fn test_checkerboard_clusters() {
        let mesh = generate(2, 2, Pattern::Checkerboard);
        assert_eq!(mesh.types().expect("types"), vec![0, 1, 0, 1]);
        let clusters = find_clusters(&mesh).expect("clusters");
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members(), &[0, 2]);
        assert_eq!(clusters[1].members(), &[1, 3]);
    }

    // Tests the striped patterns assign three bands
    // Verified by banding stripes by column
    #[test]
    fn test_stripes() {
        let stripes = generate(2, 6, Pattern::Stripes);
        assert_eq!(stripes.types().expect("types"), vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]);

        let transposed = generate(6, 1, Pattern::TransposedStripes);
        assert_eq!(transposed.types().expect("types"), vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(transposed.pattern(), Pattern::TransposedStripes);
    }

    // Tests random types are reproducible and within range
    // Verified by seeding from entropy
    #[test]
    fn test_random_reproducible() {
        let first = generate(5, 5, Pattern::Random);
        let second = generate(5, 5, Pattern::Random);
        let types = first.types().expect("types");
        assert_eq!(types, second.types().expect("types"));
        assert!(types.iter().all(|t| (0..3).contains(t)));
    }

    // Tests dimension validation
    // Verified by accepting zero columns
    #[test]
    fn test_invalid_dimensions() {
        for (columns, rows) in [(0, 3), (3, 0), (10_001, 1)] {
            assert!(matches!(
                HexLattice::new(columns, rows),
                Err(AnalysisError::InvalidParameter { .. })
            ));
        }
        let lattice = HexLattice::new(3, 2).expect("lattice");
        assert_eq!((lattice.columns(), lattice.rows(), lattice.len()), (3, 2, 6));
        assert!(!lattice.is_empty());
    }

    // Tests export produces a consistent document
    // Verified by exporting only one direction per pair
    #[test]
    fn test_to_document() {
        let mesh = generate(3, 4, Pattern::Stripes);
        let document = mesh.to_document().expect("document");
        assert_eq!(document.shape, (12, 12));
        assert!(document.validate().is_ok());
        assert_eq!(document.adjacencies.len(), mesh.table().adjacency().map_or(0, |a| a.edge_count()));
        assert_eq!(mesh.lattice().len(), 12);
    }
}
