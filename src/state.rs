//! Shared application state for all routes, built once at startup and passed to the router.

use crate::templates::Templates;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub templates: Arc<Templates>,
    /// Signs the flash-message cookie.
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(pool: SqlitePool, templates: Templates, cookie_key: Key) -> Self {
        AppState {
            pool,
            templates: Arc::new(templates),
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
