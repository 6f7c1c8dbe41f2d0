use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tempfile::TempDir;

use codesense_core::{Analyzer, Error, ReviewRequest, ReviewResult};
use codesense_db::{Database, ReviewRecord};
use codesense_server::{AppState, http};

/// Canned outcome for a [`MockAnalyzer`].
#[derive(Clone)]
pub enum MockOutcome {
    Success(ReviewResult),
    Failure(String),
}

/// Analyzer stub that returns a canned outcome and records every request
/// it was asked to review.
#[derive(Clone)]
pub struct MockAnalyzer {
    outcome: Arc<MockOutcome>,
    pub requests: Arc<Mutex<Vec<ReviewRequest>>>,
}

impl MockAnalyzer {
    pub fn succeeding(result: ReviewResult) -> Self {
        Self {
            outcome: Arc::new(MockOutcome::Success(result)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Arc::new(MockOutcome::Failure(message.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait::async_trait]
impl Analyzer for MockAnalyzer {
    async fn review(&self, request: &ReviewRequest) -> codesense_core::Result<ReviewResult> {
        self.requests.lock().unwrap().push(request.clone());
        match self.outcome.as_ref() {
            MockOutcome::Success(result) => Ok(result.clone()),
            MockOutcome::Failure(message) => Err(Error::Process(message.clone())),
        }
    }
}

/// Fresh state over a temporary database. The directory guard must stay
/// alive for the duration of the test.
pub async fn test_state(analyzer: MockAnalyzer) -> (AppState, Database, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("reviews.db")).await.unwrap();
    let state = AppState::with_database(Arc::new(analyzer), db.clone());
    (state, db, dir)
}

pub fn app(state: AppState) -> Router {
    http::router().with_state(state)
}

/// A fully populated analysis result.
pub fn sample_result() -> ReviewResult {
    ReviewResult {
        summary: "Looks solid overall".to_string(),
        bugs: vec!["off-by-one in the loop bound".to_string()],
        optimizations: vec!["hoist the allocation out of the loop".to_string()],
        readability: vec!["name the magic number".to_string()],
        refactored: "fn main() {}".to_string(),
        explanation: "Fixed the loop bound and renamed variables".to_string(),
        quality_score: 7.5,
    }
}

/// A stored review with the given id and timestamp.
pub fn sample_record(id: &str, created_at: DateTime<Utc>) -> ReviewRecord {
    ReviewRecord {
        id: id.to_string(),
        code: "print('hi')".to_string(),
        language: "python".to_string(),
        summary: "fine".to_string(),
        bugs: vec![],
        optimizations: vec![],
        readability: vec![],
        refactored: "print('hi')".to_string(),
        explanation: "unchanged".to_string(),
        quality_score: 9.0,
        created_at,
    }
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn read_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap();
    (status, value)
}
