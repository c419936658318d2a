//! Command-line interface and batch driver for mesh statistics

use crate::analysis::cache::MeshAnalysis;
use crate::analysis::paths::{path_entropy, relative_path_entropy};
use crate::io::configuration::{
    DEFAULT_PATH_LENGTH, DEFAULT_SEED, MESH_EXTENSION, OUTPUT_SUFFIX, POINT_DELIMITER,
};
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::io::points::{PointFileConfig, read_points};
use crate::io::progress::ProgressManager;
use crate::io::report::MeshReport;
use crate::mesh::{DocumentMesh, MeshDocument};
use crate::spatial::lattice::{HexLattice, Pattern};
use crate::spatial::voronoi::VoronoiMesh;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{Level, info, warn};

#[derive(Parser, Debug)]
#[command(name = "tstats")]
#[command(
    author,
    version,
    about = "Spatial statistics for cellular-tissue meshes"
)]
/// Command-line arguments for the mesh statistics tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Log progress details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Most detailed log level to emit
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::INFO
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Subcommands of `tstats`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report entropy and cluster sizes of one mesh document or a directory of them
    Stats {
        /// Mesh document or directory to process
        #[arg(value_name = "TARGET")]
        target: PathBuf,
    },

    /// Path entropy of a mesh, or relative path entropy against a reference
    Entropy {
        /// Mesh document to analyze
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Number of cells per walk
        #[arg(short = 'n', long, default_value_t = DEFAULT_PATH_LENGTH)]
        length: usize,

        /// Reference mesh document for relative entropy
        #[arg(short, long)]
        reference: Option<PathBuf>,
    },

    /// Generate a hexagonal lattice mesh document
    Lattice {
        /// Cells per row
        #[arg(short, long)]
        columns: usize,

        /// Number of rows
        #[arg(short, long)]
        rows: usize,

        /// Type pattern
        #[arg(short, long, value_enum, default_value_t = Pattern::Stripes)]
        pattern: Pattern,

        /// Random seed for the random pattern
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output file, standard output if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Tessellate a point file into a Voronoi mesh document
    Voronoi {
        /// Delimited point file
        #[arg(value_name = "POINTS")]
        points: PathBuf,

        /// Column delimiter
        #[arg(short, long, default_value_t = POINT_DELIMITER)]
        delimiter: char,

        /// Output file, `<POINTS stem>_mesh.json` if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Outcome counts of a batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Meshes reported successfully
    pub processed: usize,
    /// Meshes that failed to load or analyze
    pub failed: usize,
}

/// Analyzes mesh documents one at a time and writes a report line for each
///
/// A failing mesh is logged and skipped; the rest of the batch continues.
pub struct BatchProcessor<W: Write> {
    out: W,
    progress_manager: Option<ProgressManager>,
}

impl<W: Write> BatchProcessor<W> {
    /// Create a processor writing report lines to `out`
    pub fn new(out: W, show_progress: bool) -> Self {
        Self {
            out,
            progress_manager: show_progress.then(ProgressManager::new),
        }
    }

    /// Process every mesh document under `target`
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid or the output cannot be written.
    /// Per-mesh failures are counted in the summary instead.
    pub fn process(&mut self, target: &Path) -> Result<BatchSummary> {
        let files = collect_files(target)?;
        let mut summary = BatchSummary::default();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            let start_time = Instant::now();
            if let Some(ref pm) = self.progress_manager {
                pm.start_file(file);
            }

            match analyze_file(file) {
                Ok(report) => {
                    writeln!(self.out, "{report}")?;
                    summary.processed += 1;
                    info!(
                        file = %file.display(),
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "analyzed mesh"
                    );
                }
                Err(error) => {
                    summary.failed += 1;
                    warn!(file = %file.display(), %error, "skipping mesh");
                }
            }

            if let Some(ref pm) = self.progress_manager {
                pm.complete_file();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        self.out.flush()?;
        Ok(summary)
    }
}

/// Load one mesh document and compute its report
///
/// # Errors
///
/// Returns any load, validation or statistics error
pub fn analyze_file(path: &Path) -> Result<MeshReport> {
    let mesh = DocumentMesh::from_json_file(path)?;
    let analysis = MeshAnalysis::new(&mesh);
    MeshReport::from_analysis(path.display().to_string(), &analysis)
}

/// Mesh documents named by `target`, sorted by path
///
/// # Errors
///
/// Returns `InvalidParameter` if the target is neither a mesh document nor
/// a directory, and `FileSystem` if the directory cannot be listed
pub fn collect_files(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if is_mesh_document(target) {
            Ok(vec![target.to_path_buf()])
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &format!("mesh documents must have the .{MESH_EXTENSION} extension"),
            ))
        }
    } else if target.is_dir() {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(target).with_operation(target, "list directory")? {
            let path = entry.with_operation(target, "list directory")?.path();
            if path.is_file() && is_mesh_document(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    } else {
        Err(invalid_parameter(
            "target",
            &target.display(),
            &"must be a mesh document or a directory",
        ))
    }
}

fn is_mesh_document(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(MESH_EXTENSION)
}

/// Default output path for a mesh built from `input`
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.{MESH_EXTENSION}", stem.to_string_lossy());

    if let Some(parent) = input.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Write a document to a file, or to `out` when no file is given
fn emit_document<W: Write>(document: &MeshDocument, output: Option<&Path>, out: &mut W) -> Result<()> {
    match output {
        Some(path) => {
            document.write_json_file(path)?;
            info!(path = %path.display(), cells = document.len(), "wrote mesh document");
        }
        None => writeln!(out, "{}", document.to_json_string()?)?,
    }
    Ok(())
}

/// Execute a parsed command line, writing results to `out`
///
/// # Errors
///
/// Returns the first error of a single-mesh command, or a batch-level error
/// from `stats`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Command::Stats { target } => {
            let summary = BatchProcessor::new(&mut *out, cli.should_show_progress()).process(target)?;
            info!(
                processed = summary.processed,
                failed = summary.failed,
                "batch complete"
            );
        }
        Command::Entropy {
            input,
            length,
            reference,
        } => {
            let mesh = DocumentMesh::from_json_file(input)?;
            let value = match reference {
                Some(reference_path) => {
                    let reference_mesh = DocumentMesh::from_json_file(reference_path)?;
                    relative_path_entropy(&mesh, &reference_mesh, *length)?
                }
                None => path_entropy(&mesh, *length)?,
            };
            writeln!(out, "{}\t{value:.6}", input.display())?;
        }
        Command::Lattice {
            columns,
            rows,
            pattern,
            seed,
            output,
        } => {
            let mut rng = StdRng::seed_from_u64(*seed);
            let mesh = HexLattice::new(*columns, *rows)?.generate(*pattern, &mut rng)?;
            emit_document(&mesh.to_document()?, output.as_deref(), out)?;
        }
        Command::Voronoi {
            points,
            delimiter,
            output,
        } => {
            let labeled = read_points(points, &PointFileConfig::with_delimiter(*delimiter))?;
            let mesh = VoronoiMesh::build(&labeled)?;
            let path = output.clone().unwrap_or_else(|| output_path(points));
            emit_document(&mesh.to_document()?, Some(path.as_path()), out)?;
        }
    }
    Ok(())
}
