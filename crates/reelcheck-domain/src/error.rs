//! Domain invariant violations

use std::fmt;

use crate::MovieId;

/// Raised when a value would break an invariant of the accepted collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Release year outside the supported range
    YearOutOfRange {
        /// The offending year
        year: i32,
    },

    /// A movie with this id is already in the catalog
    DuplicateMovieId(MovieId),

    /// A movie with the same title and release year is already in the catalog
    DuplicateTitleYear {
        /// Normalized title
        title: String,
        /// Release year
        year: i32,
    },

    /// A movie must carry at least one genre
    EmptyGenres(MovieId),

    /// The same genre appears twice on one movie
    DuplicateGenre {
        /// Movie carrying the repeated genre
        movie_id: MovieId,
        /// The repeated genre
        genre: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::YearOutOfRange { year } => write!(
                f,
                "release year {} is outside [{}, {}]",
                year,
                crate::MIN_RELEASE_YEAR,
                crate::MAX_RELEASE_YEAR
            ),
            DomainError::DuplicateMovieId(id) => write!(f, "movie id {} is already present", id),
            DomainError::DuplicateTitleYear { title, year } => {
                write!(f, "'{}' ({}) is already present", title, year)
            }
            DomainError::EmptyGenres(id) => write!(f, "movie {} has no genres", id),
            DomainError::DuplicateGenre { movie_id, genre } => {
                write!(f, "movie {} lists genre '{}' more than once", movie_id, genre)
            }
        }
    }
}

impl std::error::Error for DomainError {}
