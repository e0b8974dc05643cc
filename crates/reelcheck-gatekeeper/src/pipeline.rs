//! The per-row loop shared by every dataset

use tracing::{debug, error};

use crate::diagnostics::DiagnosticLog;
use crate::{IngestError, IngestReport, RawRow, RuleOutcome, SkipReason};

/// Drive `step` over `rows` in input order
///
/// Skips and repairs are logged and the loop continues; the first fatal
/// outcome or non row-local read error ends the run. Nothing accepted before
/// a fatal row is returned.
pub(crate) fn run_rows<I, T, F>(
    dataset: &'static str,
    rows: I,
    mut step: F,
) -> Result<IngestReport<Vec<T>>, IngestError>
where
    I: IntoIterator<Item = Result<RawRow, IngestError>>,
    F: FnMut(&RawRow, &mut DiagnosticLog) -> RuleOutcome<T>,
{
    let mut log = DiagnosticLog::new(dataset);
    let mut records = Vec::new();
    let mut rows_read = 0;

    for row in rows {
        rows_read += 1;
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_row_local() => {
                log.skip_unreadable(rows_read, &SkipReason::Unreadable(e.to_string()));
                continue;
            }
            Err(e) => {
                error!(dataset, row = rows_read, "ABORTED: {}", e);
                return Err(e);
            }
        };

        match step(&row, &mut log) {
            RuleOutcome::Pass(record) => records.push(record),
            RuleOutcome::Skip(reason) => log.skip(&row, &reason),
            RuleOutcome::Fatal(reason) => {
                let err = reason.at_row(row.number());
                error!(dataset, row = row.number(), "ABORTED: {} {}", row, err);
                return Err(err);
            }
        }
    }

    let diagnostics = log.into_entries();
    debug!(
        dataset,
        rows_read,
        accepted = records.len(),
        diagnostics = diagnostics.len(),
        "Ingestion pass complete"
    );

    Ok(IngestReport {
        records,
        rows_read,
        diagnostics,
    })
}
