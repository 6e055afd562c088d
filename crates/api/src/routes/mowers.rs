use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mowers;
use crate::state::AppState;

/// Mower routes mounted at `/mowers`.
///
/// ```text
/// GET  /                              -> list_mowers
/// GET  /{mower_id}                    -> get_mower
/// POST /{mower_id}/actions/{action}   -> send_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mowers::list_mowers))
        .route("/{mower_id}", get(mowers::get_mower))
        .route("/{mower_id}/actions/{action}", post(mowers::send_action))
}
