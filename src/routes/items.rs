//! Item page routes.

use crate::handlers::items::{add_item, add_item_form, delete_item, edit_item, edit_item_form, index};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn item_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", get(add_item_form).post(add_item))
        .route("/edit/:id", get(edit_item_form).post(edit_item))
        .route("/delete/:id", post(delete_item))
        .with_state(state)
}
