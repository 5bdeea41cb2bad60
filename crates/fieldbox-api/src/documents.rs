//! Document catalog handlers: listing/search, mutations, and the
//! session-scoped category filter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use fieldbox_core::{CategoryFilter, Document, DocumentDraft, DocumentUpdate};
use fieldbox_query::visible_documents;

use crate::gate::{self, Permission};
use crate::{require_session, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Category filter; absent means "use the session-scoped filter".
    pub category: Option<CategoryFilter>,
    /// Free-text search input.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub documents: Vec<Document>,
    pub total: usize,
}

/// The ordered visible subset of the catalog for the given filter and
/// search text.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let session = require_session(&state)?;

    let filter = params.category.unwrap_or(session.filter);
    let snapshot = state.catalog.list_all();
    let documents = visible_documents(&snapshot, &filter, &params.q);
    let total = documents.len();

    Ok(Json(ListResponse { documents, total }))
}

/// Create a document and prepend it to the catalog.
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<DocumentDraft>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let session = require_session(&state)?;
    gate::require(session.account.role, Permission::CreateDocument)?;

    if draft.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    let document = state.catalog.add(draft);
    Ok((StatusCode::CREATED, Json(document)))
}

/// Replace a document's content fields, bumping its last-updated date.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<DocumentUpdate>,
) -> Result<Json<Document>, ApiError> {
    let session = require_session(&state)?;
    gate::require(session.account.role, Permission::UpdateDocument)?;

    if fields.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    state
        .catalog
        .update(&id, fields)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Document {} not found", id)))
}

/// Flip the favorite flag. Open to every authenticated role; does not touch
/// the last-updated date.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    require_session(&state)?;

    state
        .catalog
        .toggle_favorite(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Document {} not found", id)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
}

/// The session-scoped category filter.
pub async fn get_filter(State(state): State<AppState>) -> Result<Json<FilterState>, ApiError> {
    let session = require_session(&state)?;
    Ok(Json(FilterState {
        category: session.filter,
    }))
}

/// Update the session-scoped category filter (a sidebar category click).
pub async fn set_filter(
    State(state): State<AppState>,
    Json(filter): Json<FilterState>,
) -> Result<Json<FilterState>, ApiError> {
    require_session(&state)?;

    let mut slot = state.session.write().expect("session lock poisoned");
    match slot.as_mut() {
        Some(session) => {
            session.filter = filter.category;
            Ok(Json(FilterState {
                category: session.filter,
            }))
        }
        // The slot emptied between the check and the write (logout raced us).
        None => Err(ApiError::Unauthorized("ログインしてください。".to_string())),
    }
}
