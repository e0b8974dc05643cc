//! Trait definitions for external interactions
//!
//! Ingestion produces a [`Dataset`]; persisting it is somebody else's job.
//! Infrastructure implementations live in other crates.

use crate::Dataset;

/// Trait for persisting a finished dataset
///
/// Implemented by the infrastructure layer (reelcheck-store)
pub trait DatasetLoader {
    /// Error type for load operations
    type Error;

    /// Persist every collection, deriving the genre and job catalogs
    fn load(&mut self, dataset: &Dataset) -> Result<LoadSummary, Self::Error>;
}

/// Row counts written by a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Movies inserted
    pub movies: usize,

    /// Distinct genres in the derived catalog
    pub genres: usize,

    /// Movie-to-genre link rows inserted
    pub movie_genre_links: usize,

    /// Distinct jobs in the derived catalog
    pub jobs: usize,

    /// Users inserted
    pub users: usize,

    /// Ratings inserted
    pub ratings: usize,

    /// Ratings dropped because their movie was not accepted
    pub ratings_without_movie: usize,

    /// Ratings dropped because their user was not accepted
    pub ratings_without_user: usize,
}

impl LoadSummary {
    /// Total ratings dropped for dangling references
    pub fn ratings_dropped(&self) -> usize {
        self.ratings_without_movie + self.ratings_without_user
    }
}
