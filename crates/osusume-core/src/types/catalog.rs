use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OsusumeError, Result};

/// One anime title in the catalog.
///
/// Entries are row-aligned 1:1 with the embedding, genre and numeric feature
/// matrices: entry `i` describes row `i` of every matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical title.
    pub title: String,

    /// English title, when one exists.
    #[serde(default)]
    pub title_english: Option<String>,

    /// Mean community score.
    pub score: f32,

    /// Genre labels, drawn from the binarizer vocabulary.
    pub genres: Vec<String>,

    /// Source page URL.
    pub url: String,

    /// Cover image URL.
    pub image_url: String,

    /// Community member count.
    #[serde(default)]
    pub members: Option<u32>,

    /// Release year.
    #[serde(default)]
    pub year: Option<u16>,
}

/// The full metadata table, loaded once at startup and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wraps a list of entries as a catalog.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Loads the catalog from its JSON artifact.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::MissingArtifact` if the file does not exist and
    /// `OsusumeError::ArtifactFormat` if it is empty or not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OsusumeError::MissingArtifact {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let entries: Vec<CatalogEntry> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| OsusumeError::ArtifactFormat(format!("{}: {e}", path.display())))?;

        if entries.is_empty() {
            return Err(OsusumeError::ArtifactFormat(format!(
                "{}: catalog is empty",
                path.display()
            )));
        }

        Ok(Self { entries })
    }

    /// Number of catalog rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Iterate over all entries in row order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            title_english: None,
            score: 8.0,
            genres: vec!["Action".to_string()],
            url: format!("https://example.org/{title}"),
            image_url: format!("https://example.org/{title}.jpg"),
            members: Some(100_000),
            year: Some(2004),
        }
    }

    #[test]
    fn catalog_indexing() {
        let catalog = Catalog::new(vec![entry("Naruto"), entry("Monster")]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(1).unwrap().title, "Monster");
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = Catalog::load(Path::new("/nonexistent/anime_metadata.json")).unwrap_err();
        assert!(err.to_string().contains("anime_metadata.json"));
    }

    #[test]
    fn entry_serialization_roundtrip() {
        let original = entry("Steins;Gate");
        let json = serde_json::to_string(&original).unwrap();
        let back: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{
            "title": "Mushishi",
            "score": 8.7,
            "genres": ["Mystery"],
            "url": "https://example.org/mushishi",
            "image_url": "https://example.org/mushishi.jpg"
        }"#;
        let parsed: CatalogEntry = serde_json::from_str(json).unwrap();
        assert!(parsed.title_english.is_none());
        assert!(parsed.members.is_none());
        assert!(parsed.year.is_none());
    }
}
