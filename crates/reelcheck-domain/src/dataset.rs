//! The finished output of one ingestion run

use crate::{MovieCatalog, RatingRecord, UserRecord};

/// The three validated collections handed to a loader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Accepted movies
    pub movies: MovieCatalog,

    /// Accepted users
    pub users: Vec<UserRecord>,

    /// Accepted ratings (not yet filtered against movies or users)
    pub ratings: Vec<RatingRecord>,
}

impl Dataset {
    /// Bundle three finished collections
    pub fn new(movies: MovieCatalog, users: Vec<UserRecord>, ratings: Vec<RatingRecord>) -> Self {
        Self {
            movies,
            users,
            ratings,
        }
    }
}
