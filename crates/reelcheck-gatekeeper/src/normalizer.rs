//! Known-defect repairs applied to accepted movies
//!
//! Normalization never rejects a record. It runs after every validation rule
//! has passed and only rewrites field values.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use reelcheck_domain::MovieRecord;

use crate::validator::ValidatedMovie;
use crate::{Repair, RepairKind};

/// Marker that introduces an "also known as" alias in alternate titles
pub const ALIAS_MARKER: &str = "a.k.a. ";

/// Default genre corrections: bad token to its replacement(s)
pub const GENRE_REPAIRS: &[(&str, &[&str])] = &[
    ("Dramatic", &["Drama"]),
    ("Dramma", &["Drama"]),
    ("Comedy--Horror", &["Comedy", "Horror"]),
];

/// Alternate titles that do not follow the general alias rule
pub const ALIAS_EXCEPTIONS: &[(&str, &str)] = &[("a.k.a. Sydney, a.k.a. Hard Eight", "Sydney")];

static TRAILING_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s[A-Z]\w*$").expect("trailing qualifier pattern is valid"));

/// Remove a trailing `, Word` suffix (e.g. a moved article)
///
/// The suffix is removed until none is left, so the function is idempotent.
/// Whitespace before the comma goes with it. A strip that would leave
/// nothing is not applied.
///
/// # Examples
///
/// ```
/// use reelcheck_gatekeeper::strip_trailing_qualifier;
///
/// assert_eq!(strip_trailing_qualifier("Usual Suspects, The"), "Usual Suspects");
/// assert_eq!(strip_trailing_qualifier("Heat"), "Heat");
/// assert_eq!(strip_trailing_qualifier(", The"), ", The");
/// ```
pub fn strip_trailing_qualifier(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let stripped = TRAILING_QUALIFIER.replace(&current, "");
        if stripped.is_empty() || stripped == current {
            return current;
        }
        current = stripped.into_owned();
    }
}

/// Applies genre, alias and trailing-qualifier repairs
#[derive(Debug, Clone)]
pub struct Normalizer {
    genre_repairs: HashMap<String, Vec<String>>,
    alias_exceptions: HashMap<String, String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Normalizer {
    /// A normalizer with no repair tables (trailing-qualifier stripping only)
    pub fn empty() -> Self {
        Self {
            genre_repairs: HashMap::new(),
            alias_exceptions: HashMap::new(),
        }
    }

    /// A normalizer seeded with the known defects of the source dataset
    pub fn with_defaults() -> Self {
        let normalizer = GENRE_REPAIRS
            .iter()
            .fold(Self::empty(), |n, (bad, good)| n.register_genre(*bad, good));
        ALIAS_EXCEPTIONS
            .iter()
            .fold(normalizer, |n, (raw, fixed)| n.register_alias_exception(*raw, *fixed))
    }

    /// Register or override a genre correction
    pub fn register_genre(mut self, bad: impl Into<String>, replacements: &[&str]) -> Self {
        self.genre_repairs.insert(
            bad.into(),
            replacements.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    /// Register an alternate title that maps to a fixed value
    pub fn register_alias_exception(
        mut self,
        raw: impl Into<String>,
        fixed: impl Into<String>,
    ) -> Self {
        self.alias_exceptions.insert(raw.into(), fixed.into());
        self
    }

    /// Normalize a validated movie into its final record
    pub fn normalize(&self, movie: ValidatedMovie) -> (MovieRecord, Vec<Repair>) {
        let mut repairs = Vec::new();

        let genres = self.repair_genres(movie.genres, &mut repairs);

        let alternate_title = movie.alternate_title.and_then(|alt| {
            let alt = match self.strip_alias(&alt) {
                Some(stripped) => {
                    repairs.push(Repair::new(RepairKind::Alias, alt.as_str(), stripped.as_str()));
                    stripped
                }
                None => alt,
            };
            let alt = strip_logged(&alt, &mut repairs);
            if alt.is_empty() {
                None
            } else {
                Some(alt)
            }
        });

        let title = strip_logged(&movie.title, &mut repairs);

        // A repaired alternate can collapse onto the title
        let alternate_title = alternate_title.filter(|alt| *alt != title);

        let record = MovieRecord::new(
            movie.movie_id,
            title,
            alternate_title,
            movie.release_year,
            genres,
        );
        (record, repairs)
    }

    /// Replace known-bad genres, keeping order and dropping repeats
    fn repair_genres(&self, genres: Vec<String>, repairs: &mut Vec<Repair>) -> Vec<String> {
        let mut fixed: Vec<String> = Vec::with_capacity(genres.len());
        for genre in genres {
            match self.genre_repairs.get(&genre) {
                Some(replacements) => {
                    repairs.push(Repair::new(
                        RepairKind::Genre,
                        genre.as_str(),
                        replacements.join(" and "),
                    ));
                    for replacement in replacements {
                        if !fixed.contains(replacement) {
                            fixed.push(replacement.clone());
                        }
                    }
                }
                None => {
                    if !fixed.contains(&genre) {
                        fixed.push(genre);
                    }
                }
            }
        }
        fixed
    }

    /// Reduce an alternate title to the alias after the marker
    ///
    /// Returns `None` when the marker is absent.
    pub fn strip_alias(&self, alternate: &str) -> Option<String> {
        if !alternate.contains(ALIAS_MARKER) {
            return None;
        }
        if let Some(fixed) = self.alias_exceptions.get(alternate) {
            return Some(fixed.clone());
        }
        let alias = alternate.split(ALIAS_MARKER).nth(1).unwrap_or_default();
        Some(alias.trim().to_string())
    }
}

fn strip_logged(text: &str, repairs: &mut Vec<Repair>) -> String {
    let stripped = strip_trailing_qualifier(text);
    if stripped != text {
        repairs.push(Repair::new(RepairKind::TrailingQualifier, text, stripped.as_str()));
    }
    stripped
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use reelcheck_domain::ReleaseYear;

    fn genre() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Drama".to_string()),
            Just("Dramatic".to_string()),
            Just("Dramma".to_string()),
            Just("Comedy".to_string()),
            Just("Horror".to_string()),
            Just("Comedy--Horror".to_string()),
            "[A-Z][a-z]{2,8}",
        ]
    }

    proptest! {
        /// Property: normalizing an already-normalized record changes nothing
        #[test]
        fn test_normalizer_idempotent(
            title in "[A-Za-z ]{0,12}( ?, [A-Z][a-z]{1,4}){0,2}",
            alternate in proptest::option::of("(a\\.k\\.a\\. )?[A-Za-z ]{0,12}( ?, [A-Z][a-z]{1,4})?"),
            genres in prop::collection::vec(genre(), 1..6),
        ) {
            let normalizer = Normalizer::with_defaults();
            let movie = ValidatedMovie {
                movie_id: 1,
                title,
                alternate_title: alternate,
                release_year: ReleaseYear::new(2000).unwrap(),
                genres,
            };

            let (once, _) = normalizer.normalize(movie);
            let (twice, repairs) = normalizer.normalize(ValidatedMovie::from(once.clone()));
            prop_assert_eq!(&once, &twice);
            prop_assert!(repairs.is_empty());
        }
    }
}
