//! Reference registry of valid postal codes (CAP)

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::IngestError;

/// One municipality entry of the reference file; other keys are ignored
#[derive(Debug, Deserialize)]
struct Municipality {
    #[serde(default)]
    cap: Vec<String>,
}

/// Flat set of postal codes accepted by the user validator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapRegistry {
    codes: HashSet<String>,
}

impl CapRegistry {
    /// Build a registry from any list of codes
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the reference JSON: an array of objects each holding a `cap` array
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        let municipalities: Vec<Municipality> = serde_json::from_reader(reader)?;
        Ok(Self::from_codes(
            municipalities.into_iter().flat_map(|m| m.cap),
        ))
    }

    /// Load the reference JSON from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Whether a code is known
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Number of distinct codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattens_reference_file() {
        let json = r#"[
            {"nome": "Milano", "cap": ["20121", "20122"]},
            {"nome": "Bologna", "cap": ["40121"], "sigla": "BO"},
            {"nome": "Roma", "cap": ["20121"]}
        ]"#;
        let registry = CapRegistry::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("40121"));
        assert!(!registry.contains("00000"));
    }

    #[test]
    fn test_entry_without_cap_is_ignored() {
        let json = r#"[{"nome": "Nowhere"}, {"cap": ["00184"]}]"#;
        let registry = CapRegistry::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("00184"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CapRegistry::from_json_reader("{".as_bytes()),
            Err(IngestError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caps.json");
        std::fs::write(&path, r#"[{"cap": ["10121"]}]"#).unwrap();
        assert!(CapRegistry::from_path(&path).unwrap().contains("10121"));
    }
}
