use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Event log routes mounted at `/events`.
///
/// ```text
/// GET /         -> list_events
/// GET /oldest   -> oldest_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events))
        .route("/oldest", get(events::oldest_event))
}
