//! JSON API behind the single-page form.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use osusume_core::{OsusumeError, Recommendation, Recommender, RecommendRequest, DEFAULT_TOP_K};

/// Release years at or below this widget minimum mean "not provided".
const YEAR_SENTINEL: u16 = 1900;

/// Shared application state, loaded once at startup.
pub struct AppState {
    pub recommender: Recommender,
}

/// Raw form values as the page submits them, sentinels included.
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub query: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub min_score: Option<f32>,
    #[serde(default)]
    pub min_members: Option<u32>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl RecommendParams {
    /// Maps widget sentinel values to absent inputs: a zero score, zero
    /// members or a year at the widget minimum all mean the user left the
    /// field alone.
    pub fn into_request(self) -> RecommendRequest {
        let mut request = RecommendRequest::new(self.query)
            .with_genres(self.genres)
            .with_top_k(self.top_k.unwrap_or(DEFAULT_TOP_K));

        if let Some(score) = self.min_score {
            if score > 0.0 {
                request = request.with_min_score(score);
            }
        }
        if let Some(members) = self.min_members {
            if members > 0 {
                request = request.with_min_members(members);
            }
        }
        if let Some(year) = self.year {
            if year > YEAR_SENTINEL {
                request = request.with_year(year);
            }
        }

        request
    }
}

/// What the form needs to render itself.
#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    pub genres: Vec<String>,
    pub entries: usize,
}

#[derive(Debug, Serialize)]
pub struct WarningResponse {
    pub warning: String,
}

type ApiError = (StatusCode, Json<WarningResponse>);

fn warning(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(WarningResponse {
            warning: message.into(),
        }),
    )
}

/// `GET /api/catalog` — genre vocabulary and catalog size.
pub async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<CatalogInfo> {
    Json(CatalogInfo {
        genres: state.recommender.genres().to_vec(),
        entries: state.recommender.catalog_len(),
    })
}

/// `POST /api/recommend` — runs the pipeline exactly once per submit.
pub async fn recommend_handler(
    State(state): State<Arc<AppState>>,
    Json(params): Json<RecommendParams>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    if params.query.trim().is_empty() {
        return Err(warning(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Describe the plot you are looking for first.",
        ));
    }

    let request = params.into_request();
    let results = tokio::task::spawn_blocking(move || state.recommender.recommend(&request))
        .await
        .map_err(|e| {
            error!("recommend task panicked: {e}");
            warning(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        })?;

    match results {
        Ok(results) => Ok(Json(results)),
        Err(OsusumeError::EmptyQuery) => Err(warning(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Describe the plot you are looking for first.",
        )),
        Err(e) => {
            error!("recommendation failed: {e}");
            Err(warning(
                StatusCode::INTERNAL_SERVER_ERROR,
                "recommendation failed",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(json: &str) -> RecommendParams {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_body_deserializes() {
        let p = params(r#"{"query": "ninja boy"}"#);
        assert_eq!(p.query, "ninja boy");
        assert!(p.genres.is_empty());
        let request = p.into_request();
        assert_eq!(request.top_k, DEFAULT_TOP_K);
        assert!(request.numeric_triple().is_none());
    }

    #[test]
    fn sentinel_values_mean_absent() {
        let p = params(
            r#"{"query": "q", "min_score": 0.0, "min_members": 0, "year": 1900}"#,
        );
        let request = p.into_request();
        assert!(request.min_score.is_none());
        assert!(request.min_members.is_none());
        assert!(request.year.is_none());
    }

    #[test]
    fn real_values_pass_through() {
        let p = params(
            r#"{"query": "q", "genres": ["Action"], "min_score": 7.5, "min_members": 50000, "year": 2002, "top_k": 10}"#,
        );
        let request = p.into_request();
        assert_eq!(request.genres, vec!["Action".to_string()]);
        assert_eq!(request.numeric_triple(), Some((7.5, 50_000, 2002)));
        assert_eq!(request.top_k, 10);
    }

    #[test]
    fn partial_numeric_survives_mapping_but_stays_inactive() {
        // The server passes a lone score through; the core drops the family.
        let p = params(r#"{"query": "q", "min_score": 8.0}"#);
        let request = p.into_request();
        assert_eq!(request.min_score, Some(8.0));
        assert!(request.numeric_triple().is_none());
    }
}
