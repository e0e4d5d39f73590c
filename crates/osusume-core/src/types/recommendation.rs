use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;

/// One ranked result: a catalog entry annotated with its cosine similarity
/// against the fused query vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Canonical title.
    pub title: String,

    /// English title, when one exists.
    pub title_english: Option<String>,

    /// Mean community score.
    pub score: f32,

    /// Genre labels.
    pub genres: Vec<String>,

    /// Source page URL.
    pub url: String,

    /// Cover image URL.
    pub image_url: String,

    /// Cosine similarity in `[-1.0, 1.0]`.
    pub similarity: f32,
}

impl Recommendation {
    /// Builds a recommendation from a catalog entry and its similarity.
    #[must_use]
    pub fn from_entry(entry: &CatalogEntry, similarity: f32) -> Self {
        Self {
            title: entry.title.clone(),
            title_english: entry.title_english.clone(),
            score: entry.score,
            genres: entry.genres.clone(),
            url: entry.url.clone(),
            image_url: entry.image_url.clone(),
            similarity,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({:.4})", self.title, self.similarity)?;
        writeln!(f, "  score: {} | genres: {}", self.score, self.genres.join(", "))?;
        write!(f, "  {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_four_decimals() {
        let rec = Recommendation {
            title: "Naruto".into(),
            title_english: Some("Naruto".into()),
            score: 7.99,
            genres: vec!["Action".into(), "Adventure".into()],
            url: "https://example.org/naruto".into(),
            image_url: "https://example.org/naruto.jpg".into(),
            similarity: 0.87654321,
        };
        let text = rec.to_string();
        assert!(text.contains("0.8765"));
        assert!(text.contains("Action, Adventure"));
    }

    #[test]
    fn from_entry_copies_all_fields() {
        let entry = CatalogEntry {
            title: "Monster".into(),
            title_english: Some("Monster".into()),
            score: 8.8,
            genres: vec!["Drama".into()],
            url: "https://example.org/monster".into(),
            image_url: "https://example.org/monster.jpg".into(),
            members: Some(1_000_000),
            year: Some(2004),
        };
        let rec = Recommendation::from_entry(&entry, 0.5);
        assert_eq!(rec.title, entry.title);
        assert_eq!(rec.genres, entry.genres);
        assert_eq!(rec.similarity, 0.5);
    }
}
