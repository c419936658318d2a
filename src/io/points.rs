//! Reader for delimited point files of labeled cell centroids
//!
//! Each data row carries a mean intensity and a centroid. The intensity
//! classifies the cell: above the threshold is type `0`, anything else is
//! type `1`. Rows whose first column is blank are skipped.

use crate::io::configuration::{
    POINT_DELIMITER, POINT_MEAN_COLUMN, POINT_MEAN_THRESHOLD, POINT_X_COLUMN, POINT_Y_COLUMN,
};
use crate::io::error::{AnalysisError, Result, WithContext};
use crate::mesh::CellType;
use crate::spatial::voronoi::LabeledPoint;
use std::path::Path;
use tracing::debug;

/// Column layout of a point file
#[derive(Debug, Clone, PartialEq)]
pub struct PointFileConfig {
    /// Column delimiter
    pub delimiter: char,
    /// Zero-based column of the mean intensity
    pub mean_column: usize,
    /// Zero-based column of the centroid x coordinate
    pub x_column: usize,
    /// Zero-based column of the centroid y coordinate
    pub y_column: usize,
    /// Intensities strictly above this are type `0`
    pub threshold: f64,
}

impl Default for PointFileConfig {
    fn default() -> Self {
        Self {
            delimiter: POINT_DELIMITER,
            mean_column: POINT_MEAN_COLUMN,
            x_column: POINT_X_COLUMN,
            y_column: POINT_Y_COLUMN,
            threshold: POINT_MEAN_THRESHOLD,
        }
    }
}

impl PointFileConfig {
    /// Default layout with another delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    /// Type of a point with the given mean intensity
    pub fn classify(&self, mean: f64) -> CellType {
        if mean > self.threshold { 0 } else { 1 }
    }
}

/// Read every labeled point of a file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `InvalidSourceData`
/// for a row with a missing or non-numeric column
pub fn read_points(path: &Path, config: &PointFileConfig) -> Result<Vec<LabeledPoint>> {
    let content = std::fs::read_to_string(path).with_operation(path, "read point file")?;
    let points = parse_points(&content, config)?;
    debug!(path = %path.display(), points = points.len(), "read point file");
    Ok(points)
}

/// Parse labeled points from delimited text
///
/// # Errors
///
/// Returns `InvalidSourceData` for a row with a missing or non-numeric column
pub fn parse_points(content: &str, config: &PointFileConfig) -> Result<Vec<LabeledPoint>> {
    let mut points = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split(config.delimiter).collect();
        if fields.first().is_none_or(|first| first.trim().is_empty()) {
            continue;
        }
        let column = |index: usize, name: &str| -> Result<f64> {
            let raw = fields.get(index).ok_or_else(|| AnalysisError::InvalidSourceData {
                reason: format!(
                    "line {}: missing {name} column {index} ({} columns)",
                    line_number + 1,
                    fields.len()
                ),
            })?;
            raw.trim()
                .parse::<f64>()
                .map_err(|error| AnalysisError::InvalidSourceData {
                    reason: format!("line {}: {name} '{raw}' is not a number: {error}", line_number + 1),
                })
        };

        let mean = column(config.mean_column, "mean")?;
        let x = column(config.x_column, "x")?;
        let y = column(config.y_column, "y")?;
        points.push(LabeledPoint::new(x, y, config.classify(mean)));
    }
    Ok(points)
}
