//! Rating module

use crate::{MovieId, UserId};

/// A rating that passed validation
///
/// Ratings may still reference movies or users that were rejected; the
/// loader drops those silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingRecord {
    /// Rating author
    pub user_id: UserId,

    /// Rated movie
    pub movie_id: MovieId,

    /// Score in `[1, 5]`
    pub rating: u8,

    /// Unix timestamp (seconds)
    pub timestamp: i64,
}
