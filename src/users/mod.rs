use crate::state::AppState;
use axum::Router;

mod dto;
mod extract;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod repo;
pub mod repo_types;

/// Routes mounted under `/api/v1/user`.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(handlers::account_routes())
        .merge(handlers::session_routes(state))
}
