//! API routes module

pub mod health;
pub mod productos;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Routes nested under `/api` by `create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/productos", productos::router(state))
}

/// `/ready` with the database probe; merged at the root next to `/health`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
