//! Rating file validation and ingestion
//!
//! Ratings carry no cross-record state: duplicates and references to
//! unknown movies or users are left for the loader to resolve.

use std::io::Read;
use std::path::Path;

use reelcheck_domain::RatingRecord;
use tracing::info;

use crate::pipeline::run_rows;
use crate::rules::{check_width, parse_integer, Rejection};
use crate::{IngestConfig, IngestError, IngestReport, RawRow, RowSource, SkipReason};

/// Columns a rating file must declare
pub const RATING_COLUMNS: [&str; 4] = ["UserID", "MovieID", "Rating", "Timestamp"];

/// Ingests a rating file
#[derive(Debug, Clone, Default)]
pub struct RatingIngestor {
    config: IngestConfig,
}

impl RatingIngestor {
    /// Create an ingestor
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Run one pass over already-read rows
    pub fn ingest<I>(&self, rows: I) -> Result<IngestReport<Vec<RatingRecord>>, IngestError>
    where
        I: IntoIterator<Item = Result<RawRow, IngestError>>,
    {
        let report = run_rows("ratings", rows, |row, _| Rejection::outcome(self.check(row)))?;
        info!(rows = report.rows_read, accepted = report.records.len(), "Ratings ingested");
        Ok(report)
    }

    /// Read a delimited rating file from any reader
    pub fn ingest_reader<R: Read>(&self, reader: R) -> Result<IngestReport<Vec<RatingRecord>>, IngestError> {
        let source = RowSource::new(reader, self.config.delimiter_byte()?)?;
        source.require_columns(&RATING_COLUMNS)?;
        self.ingest(source)
    }

    /// Read a delimited rating file from disk
    pub fn ingest_path<P: AsRef<Path>>(&self, path: P) -> Result<IngestReport<Vec<RatingRecord>>, IngestError> {
        let source = RowSource::from_path(path, self.config.delimiter_byte()?)?;
        source.require_columns(&RATING_COLUMNS)?;
        self.ingest(source)
    }

    fn check(&self, row: &RawRow) -> Result<RatingRecord, Rejection> {
        check_width(row, self.config.rating_columns, self.config.enforce_column_width)?;

        let user_id = parse_integer("UserID", row.value("UserID"))?;
        let movie_id = parse_integer("MovieID", row.value("MovieID"))?;
        let rating = parse_integer("Rating", row.value("Rating"))?;
        let timestamp = parse_integer("Timestamp", row.value("Timestamp"))?;

        let (min, max) = (self.config.min_rating, self.config.max_rating);
        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| (min..=max).contains(r))
            .ok_or(SkipReason::RatingOutOfRange { rating, min, max })?;

        Ok(RatingRecord {
            user_id,
            movie_id,
            rating,
            timestamp,
        })
    }
}

/// Ingest a rating file
pub fn ingest_ratings<R: Read>(
    reader: R,
    config: &IngestConfig,
) -> Result<IngestReport<Vec<RatingRecord>>, IngestError> {
    RatingIngestor::new(config.clone()).ingest_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "UserID,MovieID,Rating,Timestamp\n";

    fn ingest(body: &str) -> Result<IngestReport<Vec<RatingRecord>>, IngestError> {
        ingest_ratings(format!("{}{}", HEADER, body).as_bytes(), &IngestConfig::default())
    }

    #[test]
    fn test_valid_ratings_including_repeats() {
        let report = ingest("1,10,5,978300760\n1,10,3,978300761\n").unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(
            report.records[0],
            RatingRecord {
                user_id: 1,
                movie_id: 10,
                rating: 5,
                timestamp: 978300760,
            }
        );
    }

    #[test]
    fn test_integer_fields_checked_in_order() {
        let report = ingest("u,m,r,t\n").unwrap();
        assert_eq!(report.skipped(), 1);
        assert!(report.diagnostics[0].message.contains("UserID must be an integer"));

        let report = ingest("1,10,r,t\n").unwrap();
        assert!(report.diagnostics[0].message.contains("Rating must be an integer"));
    }

    #[test]
    fn test_rating_bounds() {
        let report = ingest("1,10,0,1\n1,10,6,1\n1,10,1,1\n").unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped(), 2);
        assert!(report.warnings().all(|d| d.rule == "rating-range"));
    }

    #[test]
    fn test_wide_row_is_fatal() {
        assert!(matches!(
            ingest("1,10,5,1,extra\n"),
            Err(IngestError::TooManyColumns { row: 1, expected: 4, found: 5 })
        ));
    }
}
