//! Authentication and account-management handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use fieldbox_core::{defaults, AccountDraft, Profile};

use crate::gate::{self, Permission};
use crate::{require_session, ActiveSession, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub profile: Profile,
}

/// Authenticate against the account store and claim the session slot.
///
/// A successful login replaces any prior session (the slot holds at most
/// one); a failed login leaves the slot untouched and returns a user-visible
/// message. No lockout or retry-limit logic exists.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let account = state
        .accounts
        .find_by_credentials(&request.email, &request.password)
        .ok_or_else(|| ApiError::Unauthorized(defaults::LOGIN_ERROR_MESSAGE.to_string()))?;

    let profile = Profile::from(&account);
    info!(
        subsystem = "api",
        component = "auth",
        op = "login",
        account_id = %account.id,
        role = %account.role,
        "Session established"
    );

    *state.session.write().expect("session lock poisoned") = Some(ActiveSession::new(account));
    Ok(Json(LoginResponse { profile }))
}

/// Clear the session slot and drop its session-scoped filter state.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cleared = state
        .session
        .write()
        .expect("session lock poisoned")
        .take();

    if let Some(session) = cleared {
        info!(
            subsystem = "api",
            component = "auth",
            op = "logout",
            account_id = %session.account.id,
            "Session cleared"
        );
    }
    StatusCode::NO_CONTENT
}

/// The profile of the currently authenticated account.
pub async fn current_profile(State(state): State<AppState>) -> Result<Json<Profile>, ApiError> {
    let session = require_session(&state)?;
    Ok(Json(Profile::from(&session.account)))
}

/// List account profiles (the account-management surface).
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let session = require_session(&state)?;
    gate::require(session.account.role, Permission::ManageAccounts)?;

    Ok(Json(state.accounts.profiles()))
}

/// Create a new account. The role is fixed here, at creation.
pub async fn create_account(
    State(state): State<AppState>,
    Json(draft): Json<AccountDraft>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let session = require_session(&state)?;
    gate::require(session.account.role, Permission::CreateAccount)?;

    if draft.name.trim().is_empty()
        || draft.email.trim().is_empty()
        || draft.password.is_empty()
    {
        return Err(ApiError::BadRequest(
            "name, email, and password are required".to_string(),
        ));
    }

    let account = state.accounts.add(draft);
    Ok((StatusCode::CREATED, Json(Profile::from(&account))))
}
