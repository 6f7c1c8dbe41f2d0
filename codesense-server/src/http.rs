//! HTTP API for submitting code for review and reading stored results.
//!
//! The JSON wire format uses camelCase field names. Validation failures are
//! 400s with an `error` message; analysis and persistence failures are 500s
//! with `error` and, on the submission path, a `details` field carrying the
//! cause. Unknown GET paths answer with a service banner so probing the API
//! root is friendly; any other unknown request is a 404.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use codesense_core::ReviewRequest;
use codesense_db::{DEFAULT_RECENT_LIMIT, ReviewRecord};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/review", post(submit_review).get(route_fallback))
        .route("/api/reviews", get(list_reviews).post(route_fallback))
        .route("/api/review/:id", get(get_review).post(route_fallback))
        .fallback(route_fallback)
}

/// Error response carrying the HTTP status and the JSON body fields.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    /// Submission failure. The cause is logged and also returned to the
    /// client in the `details` field.
    fn review_failed(source: impl std::fmt::Display) -> Self {
        let details = source.to_string();
        error!("code review failed: {details}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to review code".to_string(),
            details: Some(details),
        }
    }

    /// Read-path failure. The cause is logged but the client only sees the
    /// generic message.
    fn fetch_failed(message: impl Into<String>, source: impl std::fmt::Display) -> Self {
        let message = message.into();
        error!("{message}: {source}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SubmitReviewBody {
    code: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubmitReviewResponse {
    success: bool,
    review: ReviewRecord,
}

#[derive(Debug, Serialize)]
struct ReviewListResponse {
    reviews: Vec<ReviewRecord>,
}

#[derive(Debug, Serialize)]
struct ReviewResponse {
    review: ReviewRecord,
}

/// `POST /api/review` - validate the submission, run the analyzer, persist
/// and return the finished review.
async fn submit_review(
    State(state): State<AppState>,
    body: Result<Json<SubmitReviewBody>, JsonRejection>,
) -> Result<Json<SubmitReviewResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    // Missing fields fail validation the same way empty ones do.
    let request = ReviewRequest::new(
        body.code.unwrap_or_default(),
        body.language.unwrap_or_default(),
    );
    request
        .validate()
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    let result = state
        .analyzer()
        .review(&request)
        .await
        .map_err(ApiError::review_failed)?;

    let db = state.database().await.map_err(ApiError::review_failed)?;

    let review = ReviewRecord {
        id: Uuid::new_v4().to_string(),
        code: request.code,
        language: request.language,
        summary: result.summary,
        bugs: result.bugs,
        optimizations: result.optimizations,
        readability: result.readability,
        refactored: result.refactored,
        explanation: result.explanation,
        quality_score: result.quality_score,
        created_at: Utc::now(),
    };
    db.reviews()
        .insert(&review)
        .await
        .map_err(ApiError::review_failed)?;

    info!(id = %review.id, language = %review.language, "review completed");

    Ok(Json(SubmitReviewResponse {
        success: true,
        review,
    }))
}

/// `GET /api/reviews` - the most recent reviews, newest first.
async fn list_reviews(State(state): State<AppState>) -> Result<Json<ReviewListResponse>, ApiError> {
    let db = state
        .database()
        .await
        .map_err(|err| ApiError::fetch_failed("Failed to fetch reviews", err))?;
    let reviews = db
        .reviews()
        .list_recent(DEFAULT_RECENT_LIMIT)
        .await
        .map_err(|err| ApiError::fetch_failed("Failed to fetch reviews", err))?;

    Ok(Json(ReviewListResponse { reviews }))
}

/// `GET /api/review/{id}` - one stored review, or 404 if the id is unknown.
async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let db = state
        .database()
        .await
        .map_err(|err| ApiError::fetch_failed("Failed to fetch review", err))?;
    let review = db
        .reviews()
        .find_by_id(&id)
        .await
        .map_err(|err| ApiError::fetch_failed("Failed to fetch review", err))?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(ReviewResponse { review }))
}

/// Catch-all for requests no route matched. GET answers with a service
/// banner; everything else is reported as an unknown route.
async fn route_fallback(method: Method) -> Response {
    if method == Method::GET {
        Json(json!({ "message": "CodeSense AI API" })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Route not found" })),
        )
            .into_response()
    }
}
