/// Default number of results returned per request.
pub const DEFAULT_TOP_K: usize = 5;

/// One recommendation request: a free-text plot description plus optional
/// feature inputs.
///
/// The numeric inputs participate only as a complete family: unless score,
/// members and year are all present, none of them influence the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendRequest {
    /// Free-text description of the desired plot.
    pub query: String,

    /// Selected genre labels. An empty list means the genre family is off.
    pub genres: Vec<String>,

    /// Minimum desired score.
    pub min_score: Option<f32>,

    /// Minimum desired member count.
    pub min_members: Option<u32>,

    /// Desired release year.
    pub year: Option<u16>,

    /// How many results to return.
    pub top_k: usize,
}

impl RecommendRequest {
    /// Creates a request with no optional features and the default `top_k`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            genres: Vec::new(),
            min_score: None,
            min_members: None,
            year: None,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the selected genres.
    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    /// Set the minimum score.
    pub fn with_min_score(mut self, score: f32) -> Self {
        self.min_score = Some(score);
        self
    }

    /// Set the minimum member count.
    pub fn with_min_members(mut self, members: u32) -> Self {
        self.min_members = Some(members);
        self
    }

    /// Set the release year.
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the number of results to return.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Returns the numeric triple when the whole family is present.
    #[must_use]
    pub fn numeric_triple(&self) -> Option<(f32, u32, u16)> {
        match (self.min_score, self.min_members, self.year) {
            (Some(score), Some(members), Some(year)) => Some((score, members, year)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain() {
        let request = RecommendRequest::new("a ninja boy seeking recognition")
            .with_genres(vec!["Action".into(), "Shounen".into()])
            .with_min_score(7.5)
            .with_min_members(50_000)
            .with_year(2002)
            .with_top_k(10);

        assert_eq!(request.genres.len(), 2);
        assert_eq!(request.top_k, 10);
        assert_eq!(request.numeric_triple(), Some((7.5, 50_000, 2002)));
    }

    #[test]
    fn partial_numeric_family_is_absent() {
        let request = RecommendRequest::new("space opera")
            .with_min_score(8.0)
            .with_year(1998);
        assert!(request.numeric_triple().is_none());
    }

    #[test]
    fn top_k_never_zero() {
        let request = RecommendRequest::new("anything").with_top_k(0);
        assert_eq!(request.top_k, 1);
    }
}
