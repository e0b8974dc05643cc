//! Composite title field extraction
//!
//! The source packs title, optional alternate title and release year into a
//! single field: `Title (Year)` or `Title (Alternate Title) (Year)`.

use std::sync::LazyLock;

use regex::Regex;

use crate::ExtractError;

static LEADING_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\(").expect("leading text pattern is valid"));

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("parenthesized pattern is valid"));

/// Raw parts of a composite title field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTitle {
    /// Text before the first parenthesis, trimmed
    pub title: String,

    /// First of two parenthesized segments, untrimmed
    pub alternate_title: Option<String>,

    /// Last parenthesized segment, trimmed
    pub year: String,
}

/// Split a composite title field
///
/// # Examples
///
/// ```
/// use reelcheck_gatekeeper::extract_title;
///
/// let parts = extract_title("Toy Story (1995)").unwrap();
/// assert_eq!(parts.title, "Toy Story");
/// assert_eq!(parts.alternate_title, None);
/// assert_eq!(parts.year, "1995");
/// ```
pub fn extract_title(raw: &str) -> Result<ExtractedTitle, ExtractError> {
    let title = LEADING_TEXT
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or(ExtractError::MissingYear)?;

    let mut segments: Vec<&str> = PARENTHESIZED
        .captures_iter(raw)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let (alternate_title, year) = match segments.len() {
        1 => (None, segments.remove(0)),
        2 => {
            let year = segments.remove(1);
            (Some(segments.remove(0).to_string()), year)
        }
        n => return Err(ExtractError::MalformedTitle(n)),
    };

    Ok(ExtractedTitle {
        title,
        alternate_title,
        year: year.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_year() {
        let parts = extract_title("Heat (1995)").unwrap();
        assert_eq!(parts.title, "Heat");
        assert_eq!(parts.alternate_title, None);
        assert_eq!(parts.year, "1995");
    }

    #[test]
    fn test_alternate_title() {
        let parts = extract_title("City of Lost Children, The (Cité des enfants perdus, La) (1995)")
            .unwrap();
        assert_eq!(parts.title, "City of Lost Children, The");
        assert_eq!(
            parts.alternate_title.as_deref(),
            Some("Cité des enfants perdus, La")
        );
        assert_eq!(parts.year, "1995");
    }

    #[test]
    fn test_alternate_title_is_not_trimmed() {
        let parts = extract_title("Foo ( Bar ) (2001)").unwrap();
        assert_eq!(parts.alternate_title.as_deref(), Some(" Bar "));
    }

    #[test]
    fn test_missing_parenthesis() {
        assert_eq!(extract_title("Heat"), Err(ExtractError::MissingYear));
        assert_eq!(extract_title(""), Err(ExtractError::MissingYear));
    }

    #[test]
    fn test_wrong_segment_count() {
        assert_eq!(extract_title("Heat ("), Err(ExtractError::MalformedTitle(0)));
        assert_eq!(
            extract_title("A (B) (C) (1999)"),
            Err(ExtractError::MalformedTitle(3))
        );
    }

    #[test]
    fn test_year_is_not_interpreted() {
        let parts = extract_title("Heat (nineteen)").unwrap();
        assert_eq!(parts.year, "nineteen");
    }

    #[test]
    fn test_empty_leading_text() {
        let parts = extract_title("(1995)").unwrap();
        assert_eq!(parts.title, "");
    }
}
