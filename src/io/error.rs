//! Error types and context management for mesh analysis operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all mesh analysis operations
#[derive(Debug)]
pub enum AnalysisError {
    /// Cell index does not refer to a cell of the mesh
    OutOfRange {
        /// The invalid cell index
        index: usize,
        /// Number of cells in the mesh
        len: usize,
    },

    /// Data required by the operation was never built or loaded
    MissingData {
        /// What is missing, e.g. "adjacency"
        what: &'static str,
    },

    /// Grid source carries no per-cell type field
    MissingTypeData {
        /// Name of the field that was looked up
        field: String,
    },

    /// Relative entropy is infinite because the reference lacks a key
    ///
    /// Occurs when `P(k) > 0` and `Q(k) = 0` for some key `k`
    DivergenceUndefined {
        /// Debug rendering of the offending key
        key: String,
    },

    /// Probability mass is missing or fails its normalization check
    DegenerateDistribution {
        /// Name of the distribution being built
        distribution: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Interchange document failed schema or structural validation
    InvalidDocument {
        /// Description of what's wrong with the document
        reason: String,
    },

    /// Source data doesn't meet analysis requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Tessellation could not be computed from the given points
    Geometry {
        /// Description of the failure
        reason: String,
    },

    /// Interchange document could not be parsed or written
    Json {
        /// Path of the document
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "Cell index {index} is out of range (mesh has {len} cells)")
            }
            Self::MissingData { what } => {
                write!(f, "Missing data: {what} has not been built")
            }
            Self::MissingTypeData { field } => {
                write!(f, "No data about cell types (field '{field}' not found)")
            }
            Self::DivergenceUndefined { key } => {
                write!(
                    f,
                    "Relative entropy is undefined: key {key} has zero reference probability"
                )
            }
            Self::DegenerateDistribution {
                distribution,
                reason,
            } => {
                write!(f, "Degenerate {distribution} distribution: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidDocument { reason } => {
                write!(f, "Invalid mesh document: {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::Geometry { reason } => {
                write!(f, "Tessellation failed: {reason}")
            }
            Self::Json { path, source } => {
                write!(f, "Failed to process mesh document '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Placeholder path used until a caller attaches the real one
const UNKNOWN_PATH: &str = "<unknown>";

/// Enriches file-related errors with the path being processed
pub trait WithContext<T> {
    /// Attach a path to I/O and JSON errors that were raised without one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;

    /// Attach a path and the operation being performed
    ///
    /// # Errors
    ///
    /// Propagates the original error with path and operation applied
    fn with_operation(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AnalysisError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors raised through the From conversions lack a path
            match &mut error {
                AnalysisError::Json { path: p, .. } | AnalysisError::FileSystem { path: p, .. }
                    if p.as_os_str() == UNKNOWN_PATH =>
                {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }

    fn with_operation(self, path: &Path, operation: &'static str) -> Result<T> {
        self.with_path(path).map_err(|mut error| {
            if let AnalysisError::FileSystem { operation: op, .. } = &mut error {
                *op = operation;
            }
            error
        })
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a degenerate distribution error
pub fn degenerate_distribution(distribution: &'static str, reason: &impl ToString) -> AnalysisError {
    AnalysisError::DegenerateDistribution {
        distribution,
        reason: reason.to_string(),
    }
}

/// Create an invalid document error
pub fn invalid_document(reason: &impl ToString) -> AnalysisError {
    AnalysisError::InvalidDocument {
        reason: reason.to_string(),
    }
}

/// Create an out-of-range error for a cell index
pub const fn out_of_range(index: usize, len: usize) -> AnalysisError {
    AnalysisError::OutOfRange { index, len }
}
