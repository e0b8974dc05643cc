//! Check command implementation.

use crate::cli::{CheckArgs, DatasetArg};
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, IngestSummary};
use reelcheck_gatekeeper::{CapRegistry, Diagnostic, MovieIngestor, RatingIngestor, UserIngestor};

/// Outcome of validating one file.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Counters
    pub summary: IngestSummary,
    /// Every skip and repair
    pub diagnostics: Vec<Diagnostic>,
}

/// Execute the check command.
pub fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let show_diagnostics = args.diagnostics;
    let outcome = run_check(&args, config)?;

    if show_diagnostics {
        println!("{}", formatter.format_diagnostics(&outcome.diagnostics)?);
    }
    println!("{}", formatter.format_ingest(&[outcome.summary])?);

    Ok(())
}

/// Validate the file named by `args`.
pub fn run_check(args: &CheckArgs, config: &Config) -> Result<CheckOutcome> {
    let ingest = config.ingest.clone();

    let (summary, diagnostics) = match args.dataset {
        DatasetArg::Movies => {
            let report = MovieIngestor::new(ingest).ingest_path(&args.path)?;
            let summary = IngestSummary::from_report("movies", &report, report.records.len());
            (summary, report.diagnostics)
        }
        DatasetArg::Users => {
            let caps_path = args.caps.as_ref().unwrap_or(&config.inputs.caps);
            let caps = CapRegistry::from_path(caps_path)?;
            let report = UserIngestor::new(ingest, caps).ingest_path(&args.path)?;
            let summary = IngestSummary::from_report("users", &report, report.records.len());
            (summary, report.diagnostics)
        }
        DatasetArg::Ratings => {
            let report = RatingIngestor::new(ingest).ingest_path(&args.path)?;
            let summary = IngestSummary::from_report("ratings", &report, report.records.len());
            (summary, report.diagnostics)
        }
    };

    Ok(CheckOutcome {
        summary,
        diagnostics,
    })
}
