//! CLI entry point for the tissue mesh statistics tool

use clap::Parser;
use tissue_analysis::io::cli::{Cli, run};

fn main() -> tissue_analysis::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}
