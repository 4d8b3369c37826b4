//! Application state management

use sea_orm::DatabaseConnection;

/// Shared application state; the pool is reference counted internally
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
