//! Reelcheck Domain Layer
//!
//! This crate holds the validated record types produced by ingestion and the
//! trait seam through which they are handed to a relational store. It has
//! no external dependencies; parsing, validation and persistence live in the
//! other crates.
//!
//! ## Key Concepts
//!
//! - **MovieRecord**: a movie that survived every validation rule
//! - **ReleaseYear**: a year that is guaranteed to lie in `[1888, 2024]`
//! - **MovieCatalog**: the accepted movie collection; enforces unique ids and
//!   unique (title, year) pairs on every insertion
//! - **UserRecord / RatingRecord**: the simpler companion datasets
//! - **Dataset**: the three finished collections handed to a loader

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod movie;
pub mod rating;
pub mod traits;
pub mod user;

// Re-exports for convenience
pub use catalog::MovieCatalog;
pub use dataset::Dataset;
pub use error::DomainError;
pub use movie::{MovieId, MovieRecord, ReleaseYear, MAX_RELEASE_YEAR, MIN_RELEASE_YEAR};
pub use rating::RatingRecord;
pub use traits::{DatasetLoader, LoadSummary};
pub use user::{Gender, UserId, UserRecord};
