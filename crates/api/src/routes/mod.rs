pub mod events;
pub mod health;
pub mod mowers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /events                                  recent observations (GET)
/// /events/oldest                           oldest held observation (GET)
///
/// /mowers                                  list mowers (GET)
/// /mowers/{mower_id}                       mower detail (GET)
/// /mowers/{mower_id}/actions/{action}      send a command (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/events", events::router())
        .nest("/mowers", mowers::router())
}
