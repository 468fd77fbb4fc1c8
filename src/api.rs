//! HTTP API handlers for MindMate.
//!
//! The handlers are thin: each one loads the history, calls into
//! [`crate::journal`], [`crate::aggregation`] or [`crate::lexicon`], and
//! serializes the result. Projections over an empty history answer
//! `204 No Content`.
//!
//! Logging records labels, counts and ids only. Journal text is never logged.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::aggregation::{analyze, focus_areas, history_view, quick_stats};
use crate::journal::{JournalError, submit};
use crate::lexicon::tips_for;
use crate::model::{
    ApiResponse, DerivedInsights, EntryRequest, HistoryQuery, MoodAnalysis, MoodLabel,
};
use crate::storage::Storage;

/// Tips returned by the stub analyze endpoint.
const STUB_TIPS: [&str; 4] = [
    "Take a few deep breaths and practice mindfulness for 5 minutes.",
    "Consider going for a short walk or doing light exercise to boost your mood.",
    "Remember that every feeling is valid and temporary.",
    "Try journaling your thoughts to gain clarity and perspective.",
];

/// Confidence returned by the stub analyze endpoint.
const STUB_CONFIDENCE: f64 = 0.7;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
}

/// Body of GET /insights.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    #[serde(flatten)]
    pub insights: DerivedInsights,
    pub focus_areas: [&'static str; 3],
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/entries", post(post_entry).get(get_entries))
        .route("/stats", get(get_stats))
        .route("/insights", get(get_insights))
        .route("/history", get(get_history))
        .route("/tips/:mood", get(get_tips))
        .route("/api/analyze", post(post_analyze))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /entries - Classify and record a mood entry.
///
/// # Request Body
///
/// ```json
/// { "text": "I'm anxious about an upcoming presentation" }
/// ```
///
/// # Response
///
/// `201 Created` with the analysis, the stored entry and the new entry count.
/// `400 Bad Request` if the text is blank.
#[instrument(skip(state, request))]
pub async fn post_entry(
    State(state): State<AppState>,
    Json(request): Json<EntryRequest>,
) -> Response {
    match submit(&state.storage, &request.text, Utc::now()).await {
        Ok(submission) => (StatusCode::CREATED, Json(submission)).into_response(),
        Err(JournalError::EmptyInput) => {
            info!("Rejected blank mood entry");
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to record mood entry");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /entries - The full history, oldest first.
#[instrument(skip(state))]
pub async fn get_entries(State(state): State<AppState>) -> Response {
    match state.storage.load().await {
        Ok(history) => Json(history).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to load mood history");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /stats - Total entries, entries this week, most common mood.
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Response {
    let history = match state.storage.load().await {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "Failed to load mood history");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match quick_stats(&history, Utc::now()) {
        Some(stats) => Json(stats).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// GET /insights - Distribution, weekly pattern, trend and guidance.
#[instrument(skip(state))]
pub async fn get_insights(State(state): State<AppState>) -> Response {
    let history = match state.storage.load().await {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "Failed to load mood history");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match analyze(&history, Utc::now()) {
        Some(insights) => {
            info!(
                total_entries = insights.total_entries,
                trend = ?insights.trend,
                "Insights computed"
            );
            let focus_areas = focus_areas(insights.trend);
            Json(InsightsResponse {
                insights,
                focus_areas,
            })
            .into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// GET /history - Time-ranged chart data, distribution and streak.
///
/// # Query Parameters
///
/// - `range` (optional): `7d`, `30d` or `all` (default: `7d`)
#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let history = match state.storage.load().await {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "Failed to load mood history");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match history_view(&history, query.range, Utc::now()) {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// GET /tips/:mood - Coping tips for a label.
///
/// Unknown labels get the neutral list.
pub async fn get_tips(Path(mood): Path<String>) -> Json<Vec<&'static str>> {
    Json(tips_for(MoodLabel::parse(&mood)).to_vec())
}

/// POST /api/analyze - Stub analysis endpoint.
///
/// Ignores its request body and always answers with the same neutral
/// analysis.
pub async fn post_analyze() -> Json<ApiResponse> {
    Json(ApiResponse {
        success: true,
        data: Some(MoodAnalysis {
            mood: MoodLabel::Neutral,
            confidence: STUB_CONFIDENCE,
            tips: STUB_TIPS.iter().map(|t| t.to_string()).collect(),
        }),
        error: None,
    })
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
