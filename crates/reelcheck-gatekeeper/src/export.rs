//! Cleaned movie export in the input schema

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use reelcheck_domain::{MovieCatalog, MovieRecord};
use tracing::info;

use crate::validator::{GENRE_SEPARATOR, MOVIE_COLUMNS};
use crate::{IngestConfig, IngestError};

/// Rebuild the composite title field from normalized parts
///
/// # Examples
///
/// ```
/// use reelcheck_domain::{MovieRecord, ReleaseYear};
/// use reelcheck_gatekeeper::composite_title;
///
/// let movie = MovieRecord::new(
///     1,
///     "Hard Eight".to_string(),
///     Some("Sydney".to_string()),
///     ReleaseYear::new(1996).unwrap(),
///     vec!["Crime".to_string()],
/// );
/// assert_eq!(composite_title(&movie), "Hard Eight (Sydney) (1996)");
/// ```
pub fn composite_title(movie: &MovieRecord) -> String {
    match &movie.alternate_title {
        Some(alt) => format!("{} ({}) ({})", movie.title, alt, movie.release_year),
        None => format!("{} ({})", movie.title, movie.release_year),
    }
}

/// Write the catalog as `MovieID,Title,Genres`
///
/// Fields are separated with the configured delimiter, so the output reads
/// back under the same configuration.
pub fn write_movies_csv<W: Write>(
    writer: W,
    movies: &MovieCatalog,
    config: &IngestConfig,
) -> Result<(), IngestError> {
    let mut writer = WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_writer(writer);
    writer.write_record(MOVIE_COLUMNS)?;

    let separator = GENRE_SEPARATOR.to_string();
    for movie in movies {
        writer.write_record([
            movie.movie_id.to_string(),
            composite_title(movie),
            movie.genres.join(&separator),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the catalog to `path`, replacing any existing file
pub fn export_movies<P: AsRef<Path>>(
    path: P,
    movies: &MovieCatalog,
    config: &IngestConfig,
) -> Result<(), IngestError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_movies_csv(file, movies, config)?;
    info!(path = %path.display(), movies = movies.len(), "Movies exported");
    Ok(())
}
