//! Movie row validation
//!
//! Rules run strictly in this order; the first failure ends the row:
//!
//! 1. row width within the schema (fatal)
//! 2. `MovieID` is an integer
//! 3. `MovieID` not seen before (fatal)
//! 4. composite title splits into title / alternate / year
//! 5. year is an integer
//! 6. year within `[1888, 2024]`
//! 7. genre list is not empty
//! 8. genre list has no repeats
//! 9. title is not blank
//! 10. alternate title, when present, is not blank
//! 11. alternate title, when present, differs from the title
//! 12. (normalized title, year) not accepted before

use std::collections::HashSet;

use reelcheck_domain::{MovieId, MovieRecord, ReleaseYear, MAX_RELEASE_YEAR, MIN_RELEASE_YEAR};

use crate::rules::{check_width, parse_integer, Rejection};
use crate::{extract_title, strip_trailing_qualifier, IngestConfig, RawRow, RuleOutcome};
use crate::{FatalReason, SkipReason};

/// Movie id column
pub const MOVIE_ID: &str = "MovieID";
/// Composite title column
pub const TITLE: &str = "Title";
/// Pipe-delimited genre column
pub const GENRES: &str = "Genres";
/// Columns a movie file must declare
pub const MOVIE_COLUMNS: [&str; 3] = [MOVIE_ID, TITLE, GENRES];

/// Separator inside the genre column
pub const GENRE_SEPARATOR: char = '|';

/// Cross-record state of one movie run
///
/// Owned by the coordinator and lent to the validator for each row; nothing
/// else reads or writes it.
#[derive(Debug, Clone, Default)]
pub struct DatasetState {
    seen_ids: HashSet<MovieId>,
    seen_title_year: HashSet<(String, i32)>,
}

impl DatasetState {
    /// Empty state for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a movie id has been seen
    pub fn has_id(&self, id: MovieId) -> bool {
        self.seen_ids.contains(&id)
    }

    /// Whether a (normalized title, year) pair has been accepted
    pub fn has_title_year(&self, title: &str, year: i32) -> bool {
        self.seen_title_year.contains(&(title.to_string(), year))
    }

    /// Number of distinct ids seen
    pub fn ids_seen(&self) -> usize {
        self.seen_ids.len()
    }

    /// Record an id; false if it was already present
    fn record_id(&mut self, id: MovieId) -> bool {
        self.seen_ids.insert(id)
    }

    /// Record a (title, year) pair; false if it was already present
    fn record_title_year(&mut self, title: String, year: i32) -> bool {
        self.seen_title_year.insert((title, year))
    }
}

/// A movie row that passed every rule, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMovie {
    /// Parsed id
    pub movie_id: MovieId,
    /// Trimmed title
    pub title: String,
    /// Trimmed alternate title
    pub alternate_title: Option<String>,
    /// Bounded year
    pub release_year: ReleaseYear,
    /// Trimmed genre tokens
    pub genres: Vec<String>,
}

impl From<MovieRecord> for ValidatedMovie {
    fn from(record: MovieRecord) -> Self {
        Self {
            movie_id: record.movie_id,
            title: record.title,
            alternate_title: record.alternate_title,
            release_year: record.release_year,
            genres: record.genres,
        }
    }
}

/// Applies the ordered movie rule battery
#[derive(Debug, Clone, Default)]
pub struct MovieValidator {
    config: IngestConfig,
}

impl MovieValidator {
    /// Create a validator with the given configuration
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Validate one row against the rules and the run state
    ///
    /// The id is recorded as soon as rule 3 passes, so a later row reusing
    /// it aborts the run even if this row is skipped. The (title, year)
    /// pair is recorded only when every rule passed.
    pub fn validate(&self, row: &RawRow, state: &mut DatasetState) -> RuleOutcome<ValidatedMovie> {
        Rejection::outcome(self.run_rules(row, state))
    }

    fn run_rules(&self, row: &RawRow, state: &mut DatasetState) -> Result<ValidatedMovie, Rejection> {
        // 1
        check_width(row, self.config.movie_columns, self.config.enforce_column_width)?;

        // 2
        let movie_id = parse_integer(MOVIE_ID, row.value(MOVIE_ID))?;

        // 3
        if !state.record_id(movie_id) {
            return Err(FatalReason::DuplicateId {
                entity: "movie",
                id: movie_id,
            }
            .into());
        }

        // 4
        let extracted = extract_title(row.value(TITLE)).map_err(SkipReason::from)?;

        // 5
        let year = parse_integer("year", &extracted.year)?;

        // 6
        let release_year = check_year(year)?;

        // 7, 8
        let genres = split_genres(row.value(GENRES))?;

        // 9
        let title = extracted.title;
        if title.is_empty() {
            return Err(SkipReason::EmptyTitle.into());
        }

        // 10, 11
        let alternate_title = match extracted.alternate_title {
            Some(alt) => {
                let alt = alt.trim();
                if alt.is_empty() {
                    return Err(SkipReason::EmptyAlternateTitle.into());
                }
                if alt == title {
                    return Err(SkipReason::EqualTitles.into());
                }
                Some(alt.to_string())
            }
            None => None,
        };

        // 12
        let key = strip_trailing_qualifier(&title);
        if !state.record_title_year(key.clone(), release_year.value()) {
            return Err(SkipReason::DuplicateTitleYear {
                title: key,
                year: release_year.value(),
            }
            .into());
        }

        Ok(ValidatedMovie {
            movie_id,
            title,
            alternate_title,
            release_year,
            genres,
        })
    }
}

fn check_year(year: i64) -> Result<ReleaseYear, SkipReason> {
    i32::try_from(year)
        .ok()
        .and_then(|y| ReleaseYear::new(y).ok())
        .ok_or(SkipReason::YearOutOfRange {
            year,
            min: MIN_RELEASE_YEAR,
            max: MAX_RELEASE_YEAR,
        })
}

/// Split the genre column, rejecting blank lists and repeats
fn split_genres(raw: &str) -> Result<Vec<String>, SkipReason> {
    let genres: Vec<String> = raw
        .split(GENRE_SEPARATOR)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();

    if genres.is_empty() {
        return Err(SkipReason::EmptyGenres);
    }

    let mut seen = HashSet::new();
    for genre in &genres {
        if !seen.insert(genre.as_str()) {
            return Err(SkipReason::RepeatedGenre(genre.clone()));
        }
    }

    Ok(genres)
}
