//! Tests for same-type cluster detection and cluster-size summaries

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tissue_analysis::Mesh;
    use tissue_analysis::algorithm::clusters::{ClusterSizes, find_clusters};
    use tissue_analysis::mesh::{CellType, DocumentMesh, MeshDocument};
    use tissue_analysis::spatial::lattice::{HexLattice, Pattern};

    fn mesh_from_edges(types: &[CellType], edges: &[(usize, usize)]) -> DocumentMesh {
        let n = types.len();
        let adjacencies = edges.iter().flat_map(|&(a, b)| [(a, b), (b, a)]).collect();
        DocumentMesh::from_document(MeshDocument {
            types: types.to_vec(),
            polygons: None,
            adjacencies,
            shape: (n, n),
        })
        .expect("valid test mesh")
    }

    // Tests clusters on a chain split at type boundaries
    // Verified by ignoring the type comparison when expanding a cluster
    #[test]
    fn test_chain_clusters() {
        let mesh = mesh_from_edges(&[0, 0, 1, 0], &[(0, 1), (1, 2), (2, 3)]);
        let clusters = find_clusters(&mesh).expect("clusters");

        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].members(), &[0, 1]);
        assert_eq!(clusters[0].cell_type(), 0);
        assert_eq!(clusters[1].members(), &[2]);
        assert_eq!(clusters[1].cell_type(), 1);
        assert_eq!(clusters[2].members(), &[3]);
    }

    // Tests that clusters partition the cells exactly
    // Verified by skipping the assigned check before seeding a cluster
    #[test]
    fn test_partition_is_exact() {
        let lattice = HexLattice::new(6, 5).expect("lattice");
        let mesh = lattice
            .generate(Pattern::Random, &mut StdRng::seed_from_u64(7))
            .expect("mesh");
        let clusters = find_clusters(&mesh).expect("clusters");

        let mut seen: Vec<usize> = clusters
            .iter()
            .flat_map(|cluster| cluster.members().iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..mesh.len()).collect::<Vec<_>>());

        for cluster in &clusters {
            for &cell in cluster.members() {
                assert_eq!(mesh.type_of(cell).expect("type"), cluster.cell_type());
            }
        }
    }

    // Tests that repeated runs give identical clusters
    // Verified by seeding clusters in reverse cell order
    #[test]
    fn test_deterministic_order() {
        let mesh = mesh_from_edges(&[1, 0, 1, 1], &[(0, 1), (0, 2), (2, 3)]);
        let first = find_clusters(&mesh).expect("clusters");
        let second = find_clusters(&mesh).expect("clusters");
        assert_eq!(first, second);
        assert_eq!(first[0].members(), &[0, 2, 3]);
        assert_eq!(first[1].members(), &[1]);
    }

    // Tests that isolated cells become singleton clusters
    // Verified by only seeding cells that have neighbors
    #[test]
    fn test_isolated_cells() {
        let mesh = mesh_from_edges(&[2, 2, 2], &[]);
        let clusters = find_clusters(&mesh).expect("clusters");
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|cluster| cluster.len() == 1));
    }

    // Tests that an empty mesh has no clusters
    // Verified by pushing a cluster for seed 0 unconditionally
    #[test]
    fn test_empty_mesh() {
        let mesh = mesh_from_edges(&[], &[]);
        assert!(find_clusters(&mesh).expect("clusters").is_empty());
    }

    // Tests cluster membership and display
    // Verified by changing the cluster display format
    #[test]
    fn test_cluster_accessors() {
        let mesh = mesh_from_edges(&[3, 3], &[(0, 1)]);
        let clusters = find_clusters(&mesh).expect("clusters");
        let cluster = &clusters[0];
        assert!(cluster.contains(1));
        assert!(!cluster.contains(2));
        assert!(!cluster.is_empty());
        assert_eq!(format!("{cluster}"), "Cluster(3, [0, 1])");
    }

    // Tests per-type size grouping, mean and population standard deviation
    // Verified by using the sample standard deviation
    #[test]
    fn test_size_summary() {
        let mesh = mesh_from_edges(&[0, 0, 1, 0], &[(0, 1), (1, 2), (2, 3)]);
        let clusters = find_clusters(&mesh).expect("clusters");
        let sizes = ClusterSizes::from_clusters(&clusters);

        assert_eq!(sizes.sizes(0), &[2, 1]);
        assert_eq!(sizes.sizes(1), &[1]);
        assert!(sizes.sizes(9).is_empty());
        assert_eq!(sizes.types().collect::<Vec<_>>(), vec![0, 1]);

        let summary = sizes.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].cell_type, 0);
        assert_eq!(summary[0].clusters, 2);
        assert!((summary[0].mean - 1.5).abs() < 1e-12);
        assert!((summary[0].std_dev - 0.5).abs() < 1e-12);
        assert!((summary[1].mean - 1.0).abs() < 1e-12);
        assert!(summary[1].std_dev.abs() < 1e-12);
    }
}
