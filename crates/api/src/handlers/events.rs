//! Handlers for the observation log.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::{RecentParams, DEFAULT_EVENT_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events
///
/// The most recent records, oldest first. `?limit=` caps the count
/// (default 100, never more than the log holds).
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
    let records = state.event_log.recent(limit).await;

    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/events/oldest
///
/// The oldest record still held, or `null` when the log is empty.
pub async fn oldest_event(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let record = state.event_log.peek().await;

    Ok(Json(DataResponse { data: record }))
}
