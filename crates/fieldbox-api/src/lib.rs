//! fieldbox-api - HTTP API server for the fieldbox knowledge portal.
//!
//! Composes the in-memory stores, the query engine, the access gate, and
//! the generative-model boundary behind a JSON HTTP surface. The process
//! holds a single authentication session slot (one interactive user per
//! process instance) and one assistant conversation.

pub mod assistant;
pub mod auth;
pub mod documents;
pub mod gate;

use std::sync::{Arc, RwLock};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fieldbox_assist::{AssistantSession, GeminiBackend};
use fieldbox_core::{Account, CategoryFilter, ChatBackend, GroundedSearchBackend};
use fieldbox_store::{seed, AccountStore, CatalogStore};

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// The single authenticated account plus its session-scoped UI filter.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub account: Account,
    pub filter: CategoryFilter,
}

impl ActiveSession {
    pub(crate) fn new(account: Account) -> Self {
        Self {
            account,
            filter: CategoryFilter::default(),
        }
    }
}

/// Shared application state behind the router.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub accounts: Arc<AccountStore>,
    /// Single-slot authentication session: at most one active session at a
    /// time; login replaces any prior session, logout clears it.
    pub session: Arc<RwLock<Option<ActiveSession>>>,
    /// The one assistant conversation of this process instance.
    pub assistant: Arc<tokio::sync::Mutex<AssistantSession>>,
    pub chat_backend: Arc<dyn ChatBackend>,
    pub grounded_backend: Arc<dyn GroundedSearchBackend>,
}

impl AppState {
    /// Assemble state around explicit stores and backends (tests use this
    /// with the deterministic mock backend).
    pub fn with_backends(
        catalog: CatalogStore,
        accounts: AccountStore,
        chat_backend: Arc<dyn ChatBackend>,
        grounded_backend: Arc<dyn GroundedSearchBackend>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            accounts: Arc::new(accounts),
            session: Arc::new(RwLock::new(None)),
            assistant: Arc::new(tokio::sync::Mutex::new(AssistantSession::new())),
            chat_backend,
            grounded_backend,
        }
    }

    /// Production state: seed data plus the Gemini backend from the
    /// environment.
    pub fn from_env() -> Self {
        let backend = Arc::new(GeminiBackend::from_env());
        Self::with_backends(
            CatalogStore::new(seed::seed_documents()),
            AccountStore::new(seed::seed_accounts()),
            backend.clone(),
            backend,
        )
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::current_profile))
        .route("/api/accounts", get(auth::list_accounts).post(auth::create_account))
        .route(
            "/api/filter",
            get(documents::get_filter).put(documents::set_filter),
        )
        .route(
            "/api/documents",
            get(documents::list).post(documents::create),
        )
        .route("/api/documents/:id", put(documents::update))
        .route(
            "/api/documents/:id/favorite",
            post(documents::toggle_favorite),
        )
        .route("/api/assistant/chat", post(assistant::chat))
        .route("/api/assistant/transcript", get(assistant::transcript))
        .route("/api/assistant/reset", post(assistant::reset))
        .route("/api/explain", post(assistant::explain_term))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// HTTP-mapped error for every handler.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<fieldbox_core::Error> for ApiError {
    fn from(err: fieldbox_core::Error) -> Self {
        use fieldbox_core::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::DocumentNotFound(id) => {
                ApiError::NotFound(format!("Document {} not found", id))
            }
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::Forbidden(msg) => ApiError::Forbidden(msg),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// The current session, or 401 when the slot is empty.
pub(crate) fn require_session(state: &AppState) -> Result<ActiveSession, ApiError> {
    state
        .session
        .read()
        .expect("session lock poisoned")
        .clone()
        .ok_or_else(|| ApiError::Unauthorized("ログインしてください。".to_string()))
}
