//! Raw input rows and the CSV source that yields them

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::IngestError;

/// One input line as an ordered column-name to value mapping
///
/// Rows are numbered from 1 for the first data line; the header is not
/// counted. Values beyond the header width are kept under synthetic
/// `column_N` names so the width rule can see them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    number: usize,
    fields: Vec<(String, String)>,
}

impl RawRow {
    /// Create a row from already-paired fields
    pub fn new(number: usize, fields: Vec<(String, String)>) -> Self {
        Self { number, fields }
    }

    /// Convenience constructor for literals
    ///
    /// # Examples
    ///
    /// ```
    /// use reelcheck_gatekeeper::RawRow;
    ///
    /// let row = RawRow::from_pairs(1, &[("MovieID", "1"), ("Title", "Toy Story (1995)")]);
    /// assert_eq!(row.value("Title"), "Toy Story (1995)");
    /// assert_eq!(row.value("Genres"), "");
    /// ```
    pub fn from_pairs(number: usize, pairs: &[(&str, &str)]) -> Self {
        Self::new(
            number,
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn from_record(number: usize, headers: &[String], record: &StringRecord) -> Self {
        let fields = record
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let name = headers
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{}", idx + 1));
                (name, value.to_string())
            })
            .collect();
        Self { number, fields }
    }

    /// Row number (first data row is 1)
    pub fn number(&self) -> usize {
        self.number
    }

    /// Number of values on the row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row holds no values at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Look up a column, treating a missing one as empty text
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (name, value)) in self.fields.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", name, value)?;
        }
        write!(f, "}}")
    }
}

/// Open a [`RowSource`] over any reader
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<RowSource<R>, IngestError> {
    RowSource::new(reader, delimiter)
}

/// Streams [`RawRow`]s out of a delimited file with a header line
///
/// The reader is flexible about row width: over-wide rows must reach the
/// validators, which decide whether that is fatal.
pub struct RowSource<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: StringRecord,
    next_number: usize,
}

impl RowSource<File> {
    /// Open a file on disk
    pub fn from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        Self::new(file, delimiter)
    }
}

impl<R: Read> RowSource<R> {
    /// Wrap any reader; the header line is consumed immediately
    pub fn new(reader: R, delimiter: u8) -> Result<Self, IngestError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            next_number: 1,
        })
    }

    /// Trimmed header names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Fail with `MissingColumn` unless every listed column is in the header
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), IngestError> {
        for column in columns {
            if !self.headers.iter().any(|h| h == column) {
                return Err(IngestError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<RawRow, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let number = self.next_number;
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                self.next_number += 1;
                Some(Ok(RawRow::from_record(number, &self.headers, &self.record)))
            }
            Ok(false) => None,
            Err(e) => {
                self.next_number += 1;
                Some(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows_with_numbers() {
        let data = "MovieID,Title,Genres\n1,\"Toy Story (1995)\",Animation\n2,Heat,Action\n";
        let rows: Vec<RawRow> = RowSource::new(data.as_bytes(), b',')
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number(), 1);
        assert_eq!(rows[0].value("Title"), "Toy Story (1995)");
        assert_eq!(rows[1].number(), 2);
        assert_eq!(rows[1].value("Genres"), "Action");
    }

    #[test]
    fn test_over_wide_row_is_kept() {
        let data = "MovieID,Title,Genres\n1,A (2000),Drama,extra\n";
        let mut source = RowSource::new(data.as_bytes(), b',').unwrap();
        let row = source.next().unwrap().unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row.get("column_4"), Some("extra"));
    }

    #[test]
    fn test_short_row_reads_as_empty() {
        let data = "MovieID,Title,Genres\n1,A (2000)\n";
        let row = RowSource::new(data.as_bytes(), b',')
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.value("Genres"), "");
    }

    #[test]
    fn test_headers_are_trimmed_and_required() {
        let data = " MovieID , Title \n";
        let source = RowSource::new(data.as_bytes(), b',').unwrap();
        assert_eq!(source.headers(), &["MovieID".to_string(), "Title".to_string()]);
        assert!(source.require_columns(&["MovieID", "Title"]).is_ok());
        match source.require_columns(&["MovieID", "Genres"]) {
            Err(IngestError::MissingColumn(col)) => assert_eq!(col, "Genres"),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_row_is_row_local() {
        let mut data = b"MovieID,Title,Genres\n1,".to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        data.extend_from_slice(b",Drama\n2,B (2001),Drama\n");

        let mut source = RowSource::new(data.as_slice(), b',').unwrap();
        let first = source.next().unwrap();
        assert!(first.unwrap_err().is_row_local());
        let second = source.next().unwrap().unwrap();
        assert_eq!(second.number(), 2);
    }

    #[test]
    fn test_display_shows_columns() {
        let row = RawRow::from_pairs(3, &[("MovieID", "2"), ("Title", "Heat")]);
        assert_eq!(row.to_string(), "{MovieID: \"2\", Title: \"Heat\"}");
    }
}
