pub mod health;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tickets                 list, create
/// /tickets/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/tickets", tickets::router())
}
