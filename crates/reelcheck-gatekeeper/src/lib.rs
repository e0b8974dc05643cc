//! Reelcheck Gatekeeper
//!
//! Validates and normalizes the raw movie, user and rating files before
//! anything reaches the database.
//!
//! The Gatekeeper provides:
//! - Composite title extraction (`Title (Alternate) (Year)`)
//! - An ordered rule battery per dataset, each rule passing, skipping the
//!   row, or aborting the run
//! - Known-defect repairs (genres, aliases, trailing qualifiers, jobs)
//! - Per-row diagnostics, emitted through `tracing` and returned as data
//! - A cleaned movie export in the input schema
//!
//! # Examples
//!
//! ```
//! use reelcheck_gatekeeper::{ingest_movies, IngestConfig};
//!
//! let data = "MovieID,Title,Genres\n\
//!             1,\"Usual Suspects, The (1995)\",Crime|Dramatic\n";
//! let report = ingest_movies(data.as_bytes(), &IngestConfig::default()).unwrap();
//!
//! let movie = &report.records.as_slice()[0];
//! assert_eq!(movie.title, "Usual Suspects");
//! assert_eq!(movie.genres, vec!["Crime", "Drama"]);
//! assert_eq!(report.repaired(), 2);
//! ```

#![warn(missing_docs)]

mod cap;
mod config;
mod coordinator;
mod diagnostics;
mod error;
mod export;
mod extractor;
mod normalizer;
mod pipeline;
mod ratings;
mod row;
mod rules;
mod users;
mod validator;

pub use cap::CapRegistry;
pub use config::IngestConfig;
pub use coordinator::{ingest_movies, MovieIngestor};
pub use diagnostics::{Diagnostic, IngestReport, Repair, RepairKind, Severity};
pub use error::{ExtractError, FatalReason, IngestError, SkipReason};
pub use export::{composite_title, export_movies, write_movies_csv};
pub use extractor::{extract_title, ExtractedTitle};
pub use normalizer::{strip_trailing_qualifier, Normalizer, ALIAS_MARKER, GENRE_REPAIRS};
pub use ratings::{ingest_ratings, RatingIngestor, RATING_COLUMNS};
pub use row::{read_rows, RawRow, RowSource};
pub use rules::RuleOutcome;
pub use users::{ingest_users, UserIngestor, JOB_REPAIRS, USER_COLUMNS};
pub use validator::{DatasetState, MovieValidator, ValidatedMovie, GENRE_SEPARATOR, MOVIE_COLUMNS};
