//! Input/output, command-line handling and shared configuration

/// Command-line interface and batch driver
pub mod cli;
/// Analysis constants and runtime configuration defaults
pub mod configuration;
/// Error types and file context helpers
pub mod error;
/// Reader for delimited point files
pub mod points;
/// Batch progress display
pub mod progress;
/// Per-mesh report lines
pub mod report;
