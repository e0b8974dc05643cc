//! Ingestion configuration

use serde::{Deserialize, Serialize};

use crate::IngestError;

/// Configuration shared by the movie, user and rating validators
///
/// Release-year bounds are not configurable; they are part of the
/// `ReleaseYear` type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Field delimiter of the input files
    pub delimiter: char,

    /// Abort the run when a row is wider than the schema
    pub enforce_column_width: bool,

    /// Schema width of the movie file
    pub movie_columns: usize,

    /// Schema width of the user file
    pub user_columns: usize,

    /// Schema width of the rating file
    pub rating_columns: usize,

    /// Youngest plausible user age
    pub min_user_age: u8,

    /// Oldest plausible user age
    pub max_user_age: u8,

    /// Lowest rating score
    pub min_rating: u8,

    /// Highest rating score
    pub max_rating: u8,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            enforce_column_width: true,
            movie_columns: 3,
            user_columns: 5,
            rating_columns: 4,
            min_user_age: 6,
            max_user_age: 100,
            min_rating: 1,
            max_rating: 5,
        }
    }
}

impl IngestConfig {
    /// Every structural check enabled (same as the default)
    pub fn strict() -> Self {
        Self::default()
    }

    /// Tolerate extra columns; field rules still apply
    pub fn permissive() -> Self {
        Self {
            enforce_column_width: false,
            ..Self::default()
        }
    }

    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8, IngestError> {
        if !self.delimiter.is_ascii() {
            return Err(IngestError::Config(format!(
                "delimiter '{}' is not an ASCII character",
                self.delimiter
            )));
        }
        Ok(self.delimiter as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();
        assert!(config.enforce_column_width);
        assert_eq!(config.movie_columns, 3);
        assert_eq!(config.user_columns, 5);
        assert_eq!(config.rating_columns, 4);
        assert_eq!(config.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_permissive_config() {
        let config = IngestConfig::permissive();
        assert!(!config.enforce_column_width);
        assert_eq!(config.max_rating, 5);
    }

    #[test]
    fn test_multibyte_delimiter_rejected() {
        let config = IngestConfig {
            delimiter: '€',
            ..IngestConfig::default()
        };
        assert!(config.delimiter_byte().is_err());
    }
}
