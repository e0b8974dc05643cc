//! Movie ingestion coordinator
//!
//! Owns the run state and drives each row through the validator and the
//! normalizer, in input order.

use std::io::Read;
use std::path::Path;

use reelcheck_domain::MovieCatalog;
use tracing::info;

use crate::pipeline::run_rows;
use crate::validator::{DatasetState, MovieValidator, MOVIE_COLUMNS};
use crate::{IngestConfig, IngestError, IngestReport, Normalizer, RawRow, RowSource};

/// Ingests a movie file into a [`MovieCatalog`]
#[derive(Debug, Clone, Default)]
pub struct MovieIngestor {
    config: IngestConfig,
    validator: MovieValidator,
    normalizer: Normalizer,
}

impl MovieIngestor {
    /// Create an ingestor with the default repair tables
    pub fn new(config: IngestConfig) -> Self {
        Self {
            validator: MovieValidator::new(config.clone()),
            normalizer: Normalizer::with_defaults(),
            config,
        }
    }

    /// Replace the normalizer
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Run one pass over already-read rows
    ///
    /// State starts empty on every call.
    pub fn ingest<I>(&self, rows: I) -> Result<IngestReport<MovieCatalog>, IngestError>
    where
        I: IntoIterator<Item = Result<RawRow, IngestError>>,
    {
        let mut state = DatasetState::new();

        let report = run_rows("movies", rows, |row, log| {
            self.validator.validate(row, &mut state).map(|movie| {
                let (record, repairs) = self.normalizer.normalize(movie);
                for repair in &repairs {
                    log.repair(row, repair);
                }
                record
            })
        })?;

        let IngestReport {
            records,
            rows_read,
            diagnostics,
        } = report;
        let catalog = MovieCatalog::from_records(records)?;
        info!(rows = rows_read, accepted = catalog.len(), "Movies ingested");

        Ok(IngestReport {
            records: catalog,
            rows_read,
            diagnostics,
        })
    }

    /// Read a delimited movie file from any reader
    pub fn ingest_reader<R: Read>(&self, reader: R) -> Result<IngestReport<MovieCatalog>, IngestError> {
        let source = RowSource::new(reader, self.config.delimiter_byte()?)?;
        source.require_columns(&MOVIE_COLUMNS)?;
        self.ingest(source)
    }

    /// Read a delimited movie file from disk
    pub fn ingest_path<P: AsRef<Path>>(&self, path: P) -> Result<IngestReport<MovieCatalog>, IngestError> {
        let source = RowSource::from_path(path, self.config.delimiter_byte()?)?;
        source.require_columns(&MOVIE_COLUMNS)?;
        self.ingest(source)
    }
}

/// Ingest a movie file with the default repair tables
///
/// # Examples
///
/// ```
/// use reelcheck_gatekeeper::{ingest_movies, IngestConfig};
///
/// let data = "MovieID,Title,Genres\n1,Toy Story (1995),Animation|Children\n2,Heat,Action\n";
/// let report = ingest_movies(data.as_bytes(), &IngestConfig::default()).unwrap();
///
/// assert_eq!(report.records.len(), 1);
/// assert_eq!(report.skipped(), 1);
/// ```
pub fn ingest_movies<R: Read>(
    reader: R,
    config: &IngestConfig,
) -> Result<IngestReport<MovieCatalog>, IngestError> {
    MovieIngestor::new(config.clone()).ingest_reader(reader)
}
