//! Handlers for the Automower Connect proxy endpoints.
//!
//! Each call obtains a token from the shared [`TokenCache`], so HTTP
//! requests and the poller reuse the same credentials.
//!
//! [`TokenCache`]: mowwatch_core::TokenCache

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use mowwatch_husqvarna::api::is_valid_mower_id;
use mowwatch_husqvarna::MowerAction;

use crate::error::{AppError, AppResult};
use crate::query::ActionParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_mower_id(mower_id: &str) -> AppResult<()> {
    if is_valid_mower_id(mower_id) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid mower id '{mower_id}'")))
    }
}

/// GET /api/v1/mowers
///
/// Every mower on the account with its current status.
pub async fn list_mowers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let token = state.tokens.get_token(&state.credentials).await?;
    let mowers = state.mower_api.list_mowers(&token).await?;

    Ok(Json(DataResponse { data: mowers }))
}

/// GET /api/v1/mowers/{mower_id}
///
/// The raw status document of one mower.
pub async fn get_mower(
    State(state): State<AppState>,
    Path(mower_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_mower_id(&mower_id)?;

    let token = state.tokens.get_token(&state.credentials).await?;
    let mower = state.mower_api.get_mower(&token, &mower_id).await?;

    Ok(Json(DataResponse { data: mower }))
}

/// POST /api/v1/mowers/{mower_id}/actions/{action}
///
/// Send `start`, `park`, `pause`, `parkschedule` or `resumeschedule` to a
/// mower. `?duration=` (minutes) applies to start and park. Once the API
/// accepts the command it is announced on the notification channel; a
/// failed announcement does not fail the request.
pub async fn send_action(
    State(state): State<AppState>,
    Path((mower_id, action)): Path<(String, String)>,
    Query(params): Query<ActionParams>,
) -> AppResult<impl IntoResponse> {
    validate_mower_id(&mower_id)?;
    let action = MowerAction::parse(&action, params.duration)?;

    let token = state.tokens.get_token(&state.credentials).await?;
    let response = state
        .mower_api
        .send_action(&token, &mower_id, &action)
        .await?;

    tracing::info!(mower_id = %mower_id, action = ?action, "Mower action sent");

    if let Err(e) = state.notifier.send(&action.announcement()).await {
        tracing::warn!(error = %e, "Failed to announce mower action");
    }

    Ok(Json(DataResponse { data: response }))
}
