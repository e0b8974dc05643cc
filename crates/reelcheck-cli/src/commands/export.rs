//! Export command implementation.

use crate::cli::ExportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, IngestSummary};
use reelcheck_gatekeeper::{export_movies, MovieIngestor};
use std::path::PathBuf;

/// Execute the export command.
pub fn execute_export(args: ExportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (summary, out) = run_export(&args, config)?;

    println!("{}", formatter.format_ingest(&[summary.clone()])?);
    if !formatter.is_quiet() {
        println!(
            "{}",
            formatter.success(&format!(
                "Wrote {} movie(s) to {}",
                summary.accepted,
                out.display()
            ))
        );
    }

    Ok(())
}

/// Validate the movie file and write the cleaned copy; returns the destination.
pub fn run_export(args: &ExportArgs, config: &Config) -> Result<(IngestSummary, PathBuf)> {
    let movies = args.movies.clone().unwrap_or_else(|| config.inputs.movies.clone());
    let out = args.out.clone().unwrap_or_else(|| config.export.path.clone());

    let report = MovieIngestor::new(config.ingest.clone()).ingest_path(&movies)?;
    export_movies(&out, &report.records, &config.ingest)?;

    let summary = IngestSummary::from_report("movies", &report, report.records.len());
    Ok((summary, out))
}
