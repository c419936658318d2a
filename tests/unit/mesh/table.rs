//! Tests for the shared cell table

#[cfg(test)]
mod tests {
    use tissue_analysis::AnalysisError;
    use tissue_analysis::mesh::{Adjacency, CellTable};

    fn triangle() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
    }

    // Tests lookups on a fully populated table
    // Verified by returning polygons shifted by one cell
    #[test]
    fn test_lookups() {
        let mut adjacency = Adjacency::new(2);
        adjacency.connect(0, 1).expect("connect");
        let table = CellTable::new(vec![3, 4])
            .with_polygons(vec![triangle(), triangle()])
            .expect("polygons")
            .with_adjacency(adjacency)
            .expect("adjacency");

        assert_eq!(table.len(), 2);
        assert_eq!(table.type_of(1).expect("type"), 4);
        assert_eq!(table.neighbors(0).expect("neighbors"), &[1]);
        assert_eq!(table.polygon(1).expect("polygon"), Some(&triangle()));
        assert_eq!(table.types(), &[3, 4]);
        assert_eq!(table.polygons().map(<[_]>::len), Some(2));
    }

    // Tests out-of-range cells are rejected
    // Verified by removing the bound check in polygon
    #[test]
    fn test_out_of_range() {
        let table = CellTable::new(vec![0]);
        assert!(matches!(
            table.type_of(1),
            Err(AnalysisError::OutOfRange { index: 1, len: 1 })
        ));
        assert!(matches!(table.polygon(3), Err(AnalysisError::OutOfRange { .. })));
        assert!(matches!(table.neighbors(3), Err(AnalysisError::OutOfRange { .. })));
    }

    // Tests missing adjacency is reported rather than treated as empty
    // Verified by returning an empty slice without adjacency
    #[test]
    fn test_missing_adjacency() {
        let table = CellTable::new(vec![0, 1]);
        assert!(matches!(
            table.neighbors(0),
            Err(AnalysisError::MissingData { what: "adjacency" })
        ));
        assert!(matches!(
            table.to_document(),
            Err(AnalysisError::MissingData { .. })
        ));
        assert_eq!(table.polygon(0).expect("polygon"), None);
    }

    // Tests length mismatches are rejected
    // Verified by removing the polygon count check
    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            CellTable::new(vec![0, 1]).with_polygons(vec![triangle()]),
            Err(AnalysisError::InvalidDocument { .. })
        ));
        assert!(matches!(
            CellTable::new(vec![0, 1]).with_adjacency(Adjacency::new(3)),
            Err(AnalysisError::InvalidDocument { .. })
        ));
    }

    // Tests document export lists every directed pair
    // Verified by exporting only pairs with from < to
    #[test]
    fn test_to_document() {
        let mut adjacency = Adjacency::new(3);
        adjacency.connect(0, 2).expect("connect");
        let document = CellTable::new(vec![1, 1, 2])
            .with_adjacency(adjacency)
            .expect("adjacency")
            .to_document()
            .expect("document");

        assert_eq!(document.types, vec![1, 1, 2]);
        assert_eq!(document.adjacencies, vec![(0, 2), (2, 0)]);
        assert_eq!(document.shape, (3, 3));
        assert!(document.polygons.is_none());
    }
}
