//! Integration tests for reelcheck-store
//!
//! These tests load small datasets and read them back through SQL.

use reelcheck_domain::{
    Dataset, DatasetLoader, Gender, MovieCatalog, MovieRecord, RatingRecord, ReleaseYear,
    UserRecord,
};
use reelcheck_store::{SqliteStore, StoreError};

fn movie(id: i64, title: &str, year: i32, genres: &[&str]) -> MovieRecord {
    MovieRecord::new(
        id,
        title.to_string(),
        None,
        ReleaseYear::new(year).unwrap(),
        genres.iter().map(|g| g.to_string()).collect(),
    )
}

fn user(id: i64, job: &str) -> UserRecord {
    UserRecord {
        user_id: id,
        gender: Gender::Female,
        age: 30,
        cap: "00184".to_string(),
        job: job.to_string(),
    }
}

fn rating(user_id: i64, movie_id: i64, score: u8) -> RatingRecord {
    RatingRecord {
        user_id,
        movie_id,
        rating: score,
        timestamp: 978300760,
    }
}

fn sample() -> Dataset {
    let movies = MovieCatalog::from_records(vec![
        movie(1, "Toy Story", 1995, &["Adventure", "Animation", "Children"]),
        movie(2, "Heat", 1995, &["Action", "Crime"]),
        movie(3, "Jumanji", 1995, &["Children", "Adventure"]),
    ])
    .unwrap();
    let users = vec![user(10, "Engineer"), user(11, "Teacher"), user(12, "Engineer")];
    let ratings = vec![
        rating(10, 1, 5),
        rating(11, 2, 4),
        rating(11, 2, 3),
        rating(12, 99, 2),
        rating(77, 3, 1),
    ];
    Dataset::new(movies, users, ratings)
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_load_counts() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let summary = store.load(&sample()).unwrap();

    assert_eq!(summary.movies, 3);
    assert_eq!(summary.genres, 5);
    assert_eq!(summary.movie_genre_links, 7);
    assert_eq!(summary.jobs, 2);
    assert_eq!(summary.users, 3);
    assert_eq!(summary.ratings, 3);
    assert_eq!(summary.ratings_without_movie, 1);
    assert_eq!(summary.ratings_without_user, 1);
    assert_eq!(summary.ratings_dropped(), 2);

    assert_eq!(store.count("movies").unwrap(), 3);
    assert_eq!(store.count("movies_genres_link").unwrap(), 7);
    assert_eq!(store.count("ratings").unwrap(), 3);
}

#[test]
fn test_catalogs_in_first_occurrence_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.load(&sample()).unwrap();

    let genres: Vec<_> = store.genres().unwrap();
    assert_eq!(
        genres,
        vec![
            (0, "Adventure".to_string()),
            (1, "Animation".to_string()),
            (2, "Children".to_string()),
            (3, "Action".to_string()),
            (4, "Crime".to_string()),
        ]
    );
    assert_eq!(
        store.jobs().unwrap(),
        vec![(0, "Engineer".to_string()), (1, "Teacher".to_string())]
    );
    assert_eq!(store.user_job(12).unwrap().as_deref(), Some("Engineer"));
    assert_eq!(store.user_job(99).unwrap(), None);
}

#[test]
fn test_movie_genres_keep_movie_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.load(&sample()).unwrap();

    assert_eq!(store.movie_genres(3).unwrap(), vec!["Children", "Adventure"]);
    assert!(store.movie_genres(42).unwrap().is_empty());
}

#[test]
fn test_reset_empties_every_table() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.load(&sample()).unwrap();

    store.reset().unwrap();
    for table in reelcheck_store::TABLES {
        assert_eq!(store.count(table).unwrap(), 0, "table {} not empty", table);
    }

    // Loading again after a reset reuses the same ids
    store.load(&sample()).unwrap();
    assert_eq!(store.genres().unwrap()[0], (0, "Adventure".to_string()));
}

#[test]
fn test_failed_load_rolls_back() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.load(&sample()).unwrap();

    // Same movie ids again violate the primary key
    let result = store.load(&sample());
    assert!(matches!(result, Err(StoreError::Database(_))));
    assert_eq!(store.count("movies").unwrap(), 3);
    assert_eq!(store.count("users").unwrap(), 3);
}

#[test]
fn test_replace_swaps_contents() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.load(&sample()).unwrap();

    let smaller = Dataset::new(
        MovieCatalog::from_records(vec![movie(5, "Casino", 1995, &["Crime"])]).unwrap(),
        vec![user(10, "Clerk")],
        vec![rating(10, 5, 4)],
    );
    let summary = store.replace(&smaller).unwrap();

    assert_eq!(summary.movies, 1);
    assert_eq!(store.count("movies").unwrap(), 1);
    assert_eq!(store.count("ratings").unwrap(), 1);
    assert_eq!(store.genres().unwrap(), vec![(0, "Crime".to_string())]);
}

#[test]
fn test_failed_replace_keeps_previous_contents() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.load(&sample()).unwrap();

    // A rating outside the schema's CHECK fails the insert
    let bad = Dataset::new(
        MovieCatalog::from_records(vec![movie(5, "Casino", 1995, &["Crime"])]).unwrap(),
        vec![user(10, "Clerk")],
        vec![rating(10, 5, 9)],
    );
    let result = store.replace(&bad);

    assert!(matches!(result, Err(StoreError::Database(_))));
    assert_eq!(store.count("movies").unwrap(), 3);
    assert_eq!(store.count("users").unwrap(), 3);
    assert_eq!(store.movie_genres(1).unwrap(), vec!["Adventure", "Animation", "Children"]);
}

#[test]
fn test_file_backed_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reelcheck.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.load(&sample()).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.count("users").unwrap(), 3);
    assert_eq!(store.movie_genres(1).unwrap(), vec!["Adventure", "Animation", "Children"]);
}
