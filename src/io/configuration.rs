//! Analysis constants and runtime configuration defaults

// Loose sanity bound, not a precision guarantee
/// Maximum allowed deviation of a probability sum from 1
pub const DISTRIBUTION_TOLERANCE: f64 = 0.1;

/// Name of the per-cell data array holding phenotype labels in grid sources
pub const CELL_TYPE_FIELD: &str = "cell type";

// Lattice generation
/// Number of bands used by the striped lattice patterns
pub const LATTICE_BANDS: usize = 3;
/// Number of types drawn by the random lattice pattern
pub const RANDOM_TYPE_COUNT: i64 = 3;
/// Maximum allowed lattice dimension
pub const MAX_LATTICE_DIMENSION: usize = 10_000;

// Path entropy
/// Default number of cells per walk for path entropy
pub const DEFAULT_PATH_LENGTH: usize = 2;

/// Fixed seed for reproducible random lattices
pub const DEFAULT_SEED: u64 = 42;

// Point files (one labeled centroid per row)
/// Default column delimiter of point files
pub const POINT_DELIMITER: char = '\t';
/// Column holding the mean intensity used for classification
pub const POINT_MEAN_COLUMN: usize = 2;
/// Column holding the centroid x coordinate
pub const POINT_X_COLUMN: usize = 6;
/// Column holding the centroid y coordinate
pub const POINT_Y_COLUMN: usize = 7;
/// Mean intensity above which a point is classified as type 0
pub const POINT_MEAN_THRESHOLD: f64 = 300.0;

// Progress bar display settings
/// Threshold for showing a batch progress bar
pub const MIN_FILES_FOR_PROGRESS: usize = 2;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Extension of interchange documents
pub const MESH_EXTENSION: &str = "json";
/// Suffix added to generated mesh filenames
pub const OUTPUT_SUFFIX: &str = "_mesh";
