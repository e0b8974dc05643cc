//! Gatekeeper error types
//!
//! Three tiers, from least to most severe:
//! - [`ExtractError`]: the composite title field could not be split
//! - [`SkipReason`]: a row fails a rule and is dropped; the run continues
//! - [`IngestError`]: the run is aborted

use reelcheck_domain::DomainError;
use thiserror::Error;

/// Failures of the composite title extractor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No opening parenthesis, so no year can be present
    #[error("year of release not found")]
    MissingYear,

    /// Zero, or more than two, parenthesized segments
    #[error("expected one or two parenthesized segments, found {0}")]
    MalformedTitle(usize),
}

/// Why a single row was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A field that must be an integer is not
    #[error("{field} must be an integer, found '{value}'")]
    NotAnInteger {
        /// Field name
        field: &'static str,
        /// Raw value
        value: String,
    },

    /// The composite title could not be split
    #[error("{0}")]
    Title(#[from] ExtractError),

    /// Release year outside the accepted range
    #[error("year must be within [{min}, {max}], found {year}")]
    YearOutOfRange {
        /// Parsed year
        year: i64,
        /// Lower bound
        min: i32,
        /// Upper bound
        max: i32,
    },

    /// Genre column is blank
    #[error("genres cannot be empty")]
    EmptyGenres,

    /// A genre is listed more than once
    #[error("genre '{0}' is repeated")]
    RepeatedGenre(String),

    /// Title is blank after trimming
    #[error("title cannot be empty")]
    EmptyTitle,

    /// Alternate title is present but blank after trimming
    #[error("alternate title cannot be empty")]
    EmptyAlternateTitle,

    /// Alternate title repeats the title
    #[error("alternate title and title are equal")]
    EqualTitles,

    /// A movie with the same title and year was already accepted
    #[error("film equal in name and year: '{title}' ({year})")]
    DuplicateTitleYear {
        /// Normalized title
        title: String,
        /// Release year
        year: i32,
    },

    /// Gender code is neither `M` nor `F`
    #[error("gender must be 'M' or 'F', found '{0}'")]
    InvalidGender(String),

    /// Age outside the plausible range
    #[error("age must be within [{min}, {max}], found {age}")]
    AgeOutOfRange {
        /// Parsed age
        age: i64,
        /// Lower bound
        min: u8,
        /// Upper bound
        max: u8,
    },

    /// CAP not present in the reference registry
    #[error("CAP '{0}' is unknown")]
    UnknownCap(String),

    /// CAP present in the registry but not numeric
    #[error("CAP '{0}' must contain only digits")]
    NonNumericCap(String),

    /// Rating score outside the accepted range
    #[error("rating must be within [{min}, {max}], found {rating}")]
    RatingOutOfRange {
        /// Parsed rating
        rating: i64,
        /// Lower bound
        min: u8,
        /// Upper bound
        max: u8,
    },

    /// The CSV layer could not decode the row
    #[error("row could not be decoded: {0}")]
    Unreadable(String),
}

impl SkipReason {
    /// Short name of the rule that produced this skip
    pub fn rule(&self) -> &'static str {
        match self {
            SkipReason::NotAnInteger { .. } => "integer-field",
            SkipReason::Title(ExtractError::MissingYear) => "missing-year",
            SkipReason::Title(ExtractError::MalformedTitle(_)) => "malformed-title",
            SkipReason::YearOutOfRange { .. } => "year-range",
            SkipReason::EmptyGenres => "empty-genres",
            SkipReason::RepeatedGenre(_) => "repeated-genre",
            SkipReason::EmptyTitle => "empty-title",
            SkipReason::EmptyAlternateTitle => "empty-alternate-title",
            SkipReason::EqualTitles => "equal-titles",
            SkipReason::DuplicateTitleYear { .. } => "duplicate-title-year",
            SkipReason::InvalidGender(_) => "gender",
            SkipReason::AgeOutOfRange { .. } => "age-range",
            SkipReason::UnknownCap(_) => "unknown-cap",
            SkipReason::NonNumericCap(_) => "numeric-cap",
            SkipReason::RatingOutOfRange { .. } => "rating-range",
            SkipReason::Unreadable(_) => "unreadable-row",
        }
    }
}

/// Row-level conditions that abort the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalReason {
    /// The row is wider than the schema, so the file is not the expected one
    TooManyColumns {
        /// Schema width
        expected: usize,
        /// Columns found on the row
        found: usize,
    },

    /// A primary identifier repeats: upstream data is corrupt
    DuplicateId {
        /// Dataset the identifier belongs to
        entity: &'static str,
        /// The repeated identifier
        id: i64,
    },
}

impl FatalReason {
    /// Attach the row number, producing the run-level error
    pub fn at_row(self, row: usize) -> IngestError {
        match self {
            FatalReason::TooManyColumns { expected, found } => IngestError::TooManyColumns {
                row,
                expected,
                found,
            },
            FatalReason::DuplicateId { entity, id } => IngestError::DuplicateId { row, entity, id },
        }
    }
}

/// Errors that abort an ingestion run
#[derive(Error, Debug)]
pub enum IngestError {
    /// Structural error: a row is wider than the expected schema
    #[error("Row {row}: expected at most {expected} columns, found {found}")]
    TooManyColumns {
        /// Row number (first data row is 1)
        row: usize,
        /// Schema width
        expected: usize,
        /// Columns found
        found: usize,
    },

    /// Uniqueness violation on a primary identifier
    #[error("Row {row}: the {entity} id {id} is not unique")]
    DuplicateId {
        /// Row number (first data row is 1)
        row: usize,
        /// Dataset the identifier belongs to
        entity: &'static str,
        /// The repeated identifier
        id: i64,
    },

    /// The header lacks a required column
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// Accepted records broke a collection invariant
    #[error("Catalog error: {0}")]
    Catalog(#[from] DomainError),

    /// Invalid ingestion configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV layer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reference file could not be parsed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IngestError {
    /// Row that triggered the abort, if the error is tied to one
    pub fn row(&self) -> Option<usize> {
        match self {
            IngestError::TooManyColumns { row, .. } | IngestError::DuplicateId { row, .. } => {
                Some(*row)
            }
            _ => None,
        }
    }

    /// Whether the error only affects the current row (undecodable text)
    pub(crate) fn is_row_local(&self) -> bool {
        matches!(self, IngestError::Csv(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }))
    }
}
