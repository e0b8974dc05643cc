//! Reelcheck Storage Layer
//!
//! Implements the [`DatasetLoader`] trait on SQLite.
//!
//! # Architecture
//!
//! - One table per collection (`movies`, `users`, `ratings`)
//! - Genre and job catalogs derived at load time, ids assigned by first
//!   occurrence starting from 0
//! - A `movies_genres_link` table joining movies to genres
//! - Ratings whose movie or user was not accepted are dropped, not rejected
//!
//! # Examples
//!
//! ```
//! use reelcheck_domain::{Dataset, DatasetLoader};
//! use reelcheck_store::SqliteStore;
//!
//! let mut store = SqliteStore::new(":memory:").unwrap();
//! let summary = store.load(&Dataset::default()).unwrap();
//! assert_eq!(summary.movies, 0);
//! ```

#![warn(missing_docs)]

use std::collections::{HashMap, HashSet};
use std::path::Path;

use reelcheck_domain::{Dataset, DatasetLoader, LoadSummary, MovieId, UserId};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use thiserror::Error;
use tracing::{debug, info};

/// Tables created by the schema, children first
pub const TABLES: [&str; 6] = [
    "ratings",
    "movies_genres_link",
    "users",
    "genres",
    "jobs",
    "movies",
];

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data or request
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-backed dataset loader
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database and apply the schema
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use reelcheck_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("reelcheck.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Drop every table and recreate the empty schema
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        recreate_schema(&tx)?;
        tx.commit()?;
        debug!("Database schema reset");
        Ok(())
    }

    /// Reset the schema and load `dataset` as one transaction
    ///
    /// If any insert fails the previous contents are left untouched.
    pub fn replace(&mut self, dataset: &Dataset) -> Result<LoadSummary, StoreError> {
        let tx = self.conn.transaction()?;
        recreate_schema(&tx)?;
        let summary = load_dataset(&tx, dataset)?;
        tx.commit()?;
        log_loaded(&summary);
        Ok(summary)
    }

    /// Number of rows in one of the schema's tables
    pub fn count(&self, table: &str) -> Result<usize, StoreError> {
        if !TABLES.contains(&table) {
            return Err(StoreError::InvalidData(format!("Unknown table: {}", table)));
        }
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Genre catalog as `(genre_id, genre)`, by id
    pub fn genres(&self) -> Result<Vec<(i64, String)>, StoreError> {
        self.catalog("SELECT genre_id, genre FROM genres ORDER BY genre_id")
    }

    /// Job catalog as `(job_id, job_type)`, by id
    pub fn jobs(&self) -> Result<Vec<(i64, String)>, StoreError> {
        self.catalog("SELECT job_id, job_type FROM jobs ORDER BY job_id")
    }

    fn catalog(&self, sql: &str) -> Result<Vec<(i64, String)>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let entries = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Genres linked to a movie, in the movie's own order
    pub fn movie_genres(&self, movie_id: MovieId) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT g.genre FROM movies_genres_link l
             JOIN genres g ON g.genre_id = l.genre_id
             WHERE l.movie_id = ?1
             ORDER BY l.rowid",
        )?;
        let genres = stmt
            .query_map(params![movie_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(genres)
    }

    /// Job of a stored user, resolved through the job catalog
    pub fn user_job(&self, user_id: UserId) -> Result<Option<String>, StoreError> {
        let job = self
            .conn
            .query_row(
                "SELECT j.job_type FROM users u JOIN jobs j ON j.job_id = u.job_id WHERE u.user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(job)
    }
}

/// Distinct values in first-occurrence order, with their assigned ids
struct Catalog<'a> {
    entries: Vec<&'a str>,
    ids: HashMap<&'a str, i64>,
}

impl<'a> Catalog<'a> {
    fn build(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries = Vec::new();
        let mut ids = HashMap::new();
        for value in values {
            if !ids.contains_key(value) {
                ids.insert(value, entries.len() as i64);
                entries.push(value);
            }
        }
        Self { entries, ids }
    }

    fn id(&self, value: &str) -> Result<i64, StoreError> {
        self.ids
            .get(value)
            .copied()
            .ok_or_else(|| StoreError::InvalidData(format!("Value missing from catalog: {}", value)))
    }

    fn insert(&self, tx: &Transaction<'_>, sql: &str) -> Result<(), StoreError> {
        let mut stmt = tx.prepare(sql)?;
        for (id, value) in self.entries.iter().enumerate() {
            stmt.execute(params![id as i64, value])?;
        }
        Ok(())
    }
}

fn recreate_schema(tx: &Transaction<'_>) -> Result<(), StoreError> {
    let drops: String = TABLES
        .iter()
        .map(|table| format!("DROP TABLE IF EXISTS {};\n", table))
        .collect();
    tx.execute_batch(&drops)?;
    tx.execute_batch(include_str!("schema.sql"))?;
    Ok(())
}

fn load_movies(tx: &Transaction<'_>, dataset: &Dataset, summary: &mut LoadSummary) -> Result<(), StoreError> {
    let mut stmt = tx.prepare(
        "INSERT INTO movies (movie_id, movie_title, movie_original_title, year_release)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for movie in &dataset.movies {
        stmt.execute(params![
            movie.movie_id,
            &movie.title,
            &movie.alternate_title,
            movie.release_year.value(),
        ])?;
    }
    summary.movies = dataset.movies.len();

    let genres = Catalog::build(
        dataset
            .movies
            .iter()
            .flat_map(|m| m.genres.iter().map(String::as_str)),
    );
    genres.insert(tx, "INSERT INTO genres (genre_id, genre) VALUES (?1, ?2)")?;
    summary.genres = genres.entries.len();

    let mut link = tx.prepare("INSERT INTO movies_genres_link (movie_id, genre_id) VALUES (?1, ?2)")?;
    for movie in &dataset.movies {
        for genre in &movie.genres {
            link.execute(params![movie.movie_id, genres.id(genre)?])?;
            summary.movie_genre_links += 1;
        }
    }
    Ok(())
}

fn load_users(tx: &Transaction<'_>, dataset: &Dataset, summary: &mut LoadSummary) -> Result<(), StoreError> {
    let jobs = Catalog::build(dataset.users.iter().map(|u| u.job.as_str()));
    jobs.insert(tx, "INSERT INTO jobs (job_id, job_type) VALUES (?1, ?2)")?;
    summary.jobs = jobs.entries.len();

    let mut stmt = tx.prepare(
        "INSERT INTO users (user_id, gender, age, cap, job_id) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for user in &dataset.users {
        stmt.execute(params![
            user.user_id,
            user.gender.as_str(),
            user.age,
            &user.cap,
            jobs.id(&user.job)?,
        ])?;
    }
    summary.users = dataset.users.len();
    Ok(())
}

fn load_ratings(tx: &Transaction<'_>, dataset: &Dataset, summary: &mut LoadSummary) -> Result<(), StoreError> {
    let users: HashSet<UserId> = dataset.users.iter().map(|u| u.user_id).collect();

    let mut stmt = tx.prepare(
        "INSERT INTO ratings (user_id, movie_id, rating, timestamp_unix) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for rating in &dataset.ratings {
        if !dataset.movies.contains_id(rating.movie_id) {
            summary.ratings_without_movie += 1;
            continue;
        }
        if !users.contains(&rating.user_id) {
            summary.ratings_without_user += 1;
            continue;
        }
        stmt.execute(params![
            rating.user_id,
            rating.movie_id,
            rating.rating,
            rating.timestamp,
        ])?;
        summary.ratings += 1;
    }
    Ok(())
}

fn load_dataset(tx: &Transaction<'_>, dataset: &Dataset) -> Result<LoadSummary, StoreError> {
    let mut summary = LoadSummary::default();

    load_movies(tx, dataset, &mut summary)?;
    debug!(movies = summary.movies, genres = summary.genres, "Movies loaded");

    load_users(tx, dataset, &mut summary)?;
    debug!(users = summary.users, jobs = summary.jobs, "Users loaded");

    load_ratings(tx, dataset, &mut summary)?;
    debug!(
        ratings = summary.ratings,
        without_movie = summary.ratings_without_movie,
        without_user = summary.ratings_without_user,
        "Ratings loaded"
    );
    Ok(summary)
}

fn log_loaded(summary: &LoadSummary) {
    info!(
        movies = summary.movies,
        users = summary.users,
        ratings = summary.ratings,
        dropped = summary.ratings_dropped(),
        "Dataset loaded"
    );
}

impl DatasetLoader for SqliteStore {
    type Error = StoreError;

    fn load(&mut self, dataset: &Dataset) -> Result<LoadSummary, Self::Error> {
        let tx = self.conn.transaction()?;
        let summary = load_dataset(&tx, dataset)?;
        tx.commit()?;
        log_loaded(&summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_first_occurrence() {
        let catalog = Catalog::build(["Drama", "Comedy", "Drama", "Horror", "Comedy"]);
        assert_eq!(catalog.entries, vec!["Drama", "Comedy", "Horror"]);
        assert_eq!(catalog.id("Drama").unwrap(), 0);
        assert_eq!(catalog.id("Horror").unwrap(), 2);
        assert!(catalog.id("Western").is_err());
    }

    #[test]
    fn test_error_variants() {
        let errors = [
            StoreError::from(rusqlite::Error::QueryReturnedNoRows),
            StoreError::InvalidData("bad".to_string()),
        ];
        for error in &errors {
            let prefix = match error {
                StoreError::Database(_) => "Database error",
                StoreError::InvalidData(_) => "Invalid data",
            };
            assert!(error.to_string().starts_with(prefix));
        }
    }

    #[test]
    fn test_count_rejects_unknown_table() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert_eq!(store.count("movies").unwrap(), 0);
        assert!(matches!(
            store.count("sqlite_master; DROP TABLE movies"),
            Err(StoreError::InvalidData(_))
        ));
    }
}
