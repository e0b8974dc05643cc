//! Movie module - the central entity of the ingestion pipeline

use std::fmt;

use crate::DomainError;

/// Externally supplied movie identifier
pub type MovieId = i64;

/// Earliest accepted release year (first known motion picture)
pub const MIN_RELEASE_YEAR: i32 = 1888;

/// Latest accepted release year
pub const MAX_RELEASE_YEAR: i32 = 2024;

/// A release year bounded to `[MIN_RELEASE_YEAR, MAX_RELEASE_YEAR]`
///
/// The bound is checked at construction, so every `MovieRecord` carries a
/// year that is valid by type rather than by convention.
///
/// # Examples
///
/// ```
/// use reelcheck_domain::ReleaseYear;
///
/// assert_eq!(ReleaseYear::new(1995).unwrap().value(), 1995);
/// assert!(ReleaseYear::new(1887).is_err());
/// assert!(ReleaseYear::new(2025).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    /// Create a release year, rejecting values outside the supported range
    pub fn new(year: i32) -> Result<Self, DomainError> {
        if (MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year) {
            Ok(Self(year))
        } else {
            Err(DomainError::YearOutOfRange { year })
        }
    }

    /// Get the raw year
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for ReleaseYear {
    type Error = DomainError;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::new(year)
    }
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A movie that passed validation and normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    /// Identifier from the source dataset
    pub movie_id: MovieId,

    /// Normalized primary title
    pub title: String,

    /// Normalized alternate (original-language) title, if any
    pub alternate_title: Option<String>,

    /// Year of release
    pub release_year: ReleaseYear,

    /// Genres in source order, without repeats
    pub genres: Vec<String>,
}

impl MovieRecord {
    /// Create a new movie record
    pub fn new(
        movie_id: MovieId,
        title: String,
        alternate_title: Option<String>,
        release_year: ReleaseYear,
        genres: Vec<String>,
    ) -> Self {
        Self {
            movie_id,
            title,
            alternate_title,
            release_year,
            genres,
        }
    }

    /// Key used for "same movie" detection: (title, year)
    pub fn title_year_key(&self) -> (String, i32) {
        (self.title.clone(), self.release_year.value())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: construction succeeds exactly on the closed range
        #[test]
        fn test_year_accepted_iff_in_range(year in -5000i32..5000) {
            let in_range = (MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year);
            prop_assert_eq!(ReleaseYear::new(year).is_ok(), in_range);
        }

        /// Property: an accepted year reports back the same value
        #[test]
        fn test_year_value_roundtrip(year in MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR) {
            prop_assert_eq!(ReleaseYear::new(year).map(|y| y.value()), Ok(year));
        }
    }
}
