//! The accepted movie collection

use std::collections::HashSet;

use crate::{DomainError, MovieId, MovieRecord};

/// Ordered collection of accepted movies
///
/// Insertion order is preserved. Every insertion checks the collection-wide
/// invariants, so a catalog can never hold two movies with the same id or
/// the same (title, year) pair, whatever path the records took to get here.
///
/// # Examples
///
/// ```
/// use reelcheck_domain::{MovieCatalog, MovieRecord, ReleaseYear};
///
/// let mut catalog = MovieCatalog::new();
/// let year = ReleaseYear::new(1995).unwrap();
/// let movie = MovieRecord::new(1, "Toy Story".into(), None, year, vec!["Animation".into()]);
///
/// catalog.try_insert(movie.clone()).unwrap();
/// assert!(catalog.try_insert(movie).is_err());
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    movies: Vec<MovieRecord>,
    ids: HashSet<MovieId>,
    title_years: HashSet<(String, i32)>,
}

impl MovieCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, failing on the first invariant violation
    pub fn from_records<I>(records: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = MovieRecord>,
    {
        let mut catalog = Self::new();
        for record in records {
            catalog.try_insert(record)?;
        }
        Ok(catalog)
    }

    /// Append a movie if it keeps every invariant intact
    pub fn try_insert(&mut self, movie: MovieRecord) -> Result<(), DomainError> {
        if self.ids.contains(&movie.movie_id) {
            return Err(DomainError::DuplicateMovieId(movie.movie_id));
        }

        let key = movie.title_year_key();
        if self.title_years.contains(&key) {
            return Err(DomainError::DuplicateTitleYear {
                title: key.0,
                year: key.1,
            });
        }

        if movie.genres.is_empty() {
            return Err(DomainError::EmptyGenres(movie.movie_id));
        }

        let mut seen = HashSet::new();
        for genre in &movie.genres {
            if !seen.insert(genre.as_str()) {
                return Err(DomainError::DuplicateGenre {
                    movie_id: movie.movie_id,
                    genre: genre.clone(),
                });
            }
        }

        self.ids.insert(movie.movie_id);
        self.title_years.insert(key);
        self.movies.push(movie);
        Ok(())
    }

    /// Number of movies
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Whether a movie id is present
    pub fn contains_id(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    /// Look up a movie by id
    pub fn get(&self, id: MovieId) -> Option<&MovieRecord> {
        if !self.contains_id(id) {
            return None;
        }
        self.movies.iter().find(|m| m.movie_id == id)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.movies.iter()
    }

    /// Borrow the movies as a slice
    pub fn as_slice(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Consume the catalog, returning the movies in insertion order
    pub fn into_vec(self) -> Vec<MovieRecord> {
        self.movies
    }
}

impl<'a> IntoIterator for &'a MovieCatalog {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

impl PartialEq for MovieCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.movies == other.movies
    }
}

impl Eq for MovieCatalog {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReleaseYear;

    fn movie(id: MovieId, title: &str, year: i32) -> MovieRecord {
        MovieRecord::new(
            id,
            title.to_string(),
            None,
            ReleaseYear::new(year).unwrap(),
            vec!["Drama".to_string()],
        )
    }

    #[test]
    fn test_preserves_insertion_order() {
        let catalog =
            MovieCatalog::from_records(vec![movie(3, "C", 2000), movie(1, "A", 2001)]).unwrap();
        let ids: Vec<MovieId> = catalog.iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut catalog = MovieCatalog::new();
        catalog.try_insert(movie(1, "A", 2000)).unwrap();
        assert_eq!(
            catalog.try_insert(movie(1, "B", 2001)),
            Err(DomainError::DuplicateMovieId(1))
        );
    }

    #[test]
    fn test_rejects_duplicate_title_year() {
        let mut catalog = MovieCatalog::new();
        catalog.try_insert(movie(1, "Heat", 1995)).unwrap();
        assert!(matches!(
            catalog.try_insert(movie(2, "Heat", 1995)),
            Err(DomainError::DuplicateTitleYear { .. })
        ));
        // Same title, different year is a remake, not a duplicate
        assert!(catalog.try_insert(movie(3, "Heat", 1986)).is_ok());
    }

    #[test]
    fn test_rejects_bad_genres() {
        let mut catalog = MovieCatalog::new();
        let mut empty = movie(1, "A", 2000);
        empty.genres.clear();
        assert_eq!(catalog.try_insert(empty), Err(DomainError::EmptyGenres(1)));

        let mut repeated = movie(2, "B", 2000);
        repeated.genres.push("Drama".to_string());
        assert!(matches!(
            catalog.try_insert(repeated),
            Err(DomainError::DuplicateGenre { movie_id: 2, .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = MovieCatalog::from_records(vec![movie(7, "Seven", 1995)]).unwrap();
        assert_eq!(catalog.get(7).map(|m| m.title.as_str()), Some("Seven"));
        assert!(catalog.get(8).is_none());
    }
}
