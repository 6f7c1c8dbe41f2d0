//! CodeSense API server library
//!
//! Exposes the application state and the HTTP router so integration tests
//! can drive the API in-process without binding a socket.

pub mod http;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;

use codesense_core::DynAnalyzer;
use codesense_db::Database;

/// Shared state handed to every HTTP handler.
///
/// The review database is opened lazily on the first request that needs it
/// and shared from then on. The cell serializes concurrent first requests
/// so only one connection pool is ever created; a failed open leaves the
/// cell empty and the next request tries again.
#[derive(Clone)]
pub struct AppState {
    analyzer: DynAnalyzer,
    db_path: PathBuf,
    db: Arc<OnceCell<Database>>,
}

impl AppState {
    /// Create state that will open the database at `db_path` on first use.
    pub fn new(analyzer: DynAnalyzer, db_path: PathBuf) -> Self {
        Self {
            analyzer,
            db_path,
            db: Arc::new(OnceCell::new()),
        }
    }

    /// Create state around an already-open database, skipping lazy init.
    pub fn with_database(analyzer: DynAnalyzer, db: Database) -> Self {
        Self {
            analyzer,
            db_path: PathBuf::new(),
            db: Arc::new(OnceCell::new_with(Some(db))),
        }
    }

    pub fn analyzer(&self) -> &DynAnalyzer {
        &self.analyzer
    }

    /// The shared database, opened on first call.
    pub async fn database(&self) -> codesense_db::Result<&Database> {
        self.db
            .get_or_try_init(|| Database::new(&self.db_path))
            .await
    }
}
