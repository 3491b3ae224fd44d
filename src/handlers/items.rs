//! Item handlers: list, add, edit, delete.

use crate::error::AppError;
use crate::extractors::flash::{FlashLevel, Flashes};
use crate::model::Item;
use crate::service::{CrudService, ItemForm, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    Form,
};
use minijinja::context;

pub const ITEM_ADDED: &str = "Item added successfully!";
pub const ITEM_UPDATED: &str = "Item updated successfully!";
pub const ITEM_DELETED: &str = "Item deleted.";

/// Only plain digit strings name an item; signs, blanks and overflow do not.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    let not_found = || AppError::NotFound(format!("item {}", id_str));
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    id_str.parse().map_err(|_| not_found())
}

fn edit_path(id: i64) -> String {
    format!("/edit/{}", id)
}

/// GET /: every item ordered by name.
pub async fn index(
    State(state): State<AppState>,
    flashes: Flashes,
) -> Result<impl IntoResponse, AppError> {
    let items: Vec<Item> = CrudService::list_all(&state.pool).await?;
    let (jar, messages) = flashes.take();
    let html = state
        .templates
        .render("index.html", &context! { items => items, messages => messages })?;
    Ok((jar, Html(html)))
}

/// GET /add: empty form.
pub async fn add_item_form(
    State(state): State<AppState>,
    flashes: Flashes,
) -> Result<impl IntoResponse, AppError> {
    let (jar, messages) = flashes.take();
    let html = state
        .templates
        .render("add_item.html", &context! { messages => messages })?;
    Ok((jar, Html(html)))
}

/// POST /add: validate, create, back to the list.
pub async fn add_item(
    State(state): State<AppState>,
    flashes: Flashes,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let form: ItemForm = pairs.into_iter().collect();
    let fields = match RequestValidator::validate_item(&form) {
        Ok(f) => f,
        Err(AppError::Validation(msg)) => {
            return Ok((flashes.push(FlashLevel::Error, msg), Redirect::to("/add")));
        }
        Err(e) => return Err(e),
    };
    let item: Item = CrudService::create(&state.pool, &fields).await?;
    tracing::info!(item_id = item.id, name = %item.name, "item created");
    Ok((flashes.push(FlashLevel::Success, ITEM_ADDED), Redirect::to("/")))
}

/// GET /edit/:id: form populated from the stored item.
pub async fn edit_item_form(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    flashes: Flashes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let item: Item = CrudService::get(&state.pool, id).await?;
    let (jar, messages) = flashes.take();
    let html = state
        .templates
        .render("edit_item.html", &context! { item => item, messages => messages })?;
    Ok((jar, Html(html)))
}

/// POST /edit/:id: the item must exist before the submission is looked at.
pub async fn edit_item(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    flashes: Flashes,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let form: ItemForm = pairs.into_iter().collect();
    let _existing: Item = CrudService::get(&state.pool, id).await?;
    let fields = match RequestValidator::validate_item(&form) {
        Ok(f) => f,
        Err(AppError::Validation(msg)) => {
            return Ok((flashes.push(FlashLevel::Error, msg), Redirect::to(&edit_path(id))));
        }
        Err(e) => return Err(e),
    };
    let item: Item = CrudService::update(&state.pool, id, &fields).await?;
    tracing::info!(item_id = item.id, name = %item.name, "item updated");
    Ok((flashes.push(FlashLevel::Success, ITEM_UPDATED), Redirect::to("/")))
}

/// POST /delete/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    flashes: Flashes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let item: Item = CrudService::delete(&state.pool, id).await?;
    tracing::info!(item_id = item.id, name = %item.name, "item deleted");
    Ok((flashes.push(FlashLevel::Info, ITEM_DELETED), Redirect::to("/")))
}
