//! Item HTTP handlers.
//!
//! This module implements one endpoint per HTTP method:
//! - GET /items/{item_id} - Read an item (missing items are `null`, not 404)
//! - POST /items/ - Create an item under the next free id
//! - PUT /items/{item_id} - Insert or replace an item
//! - PATCH /items/{item_id} - Update some fields of an existing item
//! - DELETE /items/{item_id} - Delete an item
//! - HEAD /items/{item_id} - Check whether an item exists
//! - OPTIONS /items/ - List the supported methods

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderName, StatusCode, header},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::item::{
        Item, ItemResponse, ItemUpdate, MAX_QUERY_LEN, ReadItemQuery, ReadItemResponse,
    },
    state::AppState,
};

/// Methods advertised by `OPTIONS /items/`.
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,HEAD,OPTIONS";

static ITEM_EXISTS_HEADER: HeaderName = HeaderName::from_static("x-item-exists");

/// Get an item by id.
///
/// # Endpoint
///
/// `GET /items/{item_id}?q=<search>`
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "item_id": 1,
///   "item": { "name": "Widget", "description": null, "price": 9.99, "tax": null },
///   "q": "blue"
/// }
/// ```
///
/// `item` is `null` when nothing is stored under `item_id`.
///
/// # Errors
///
/// - **422**: `item_id` is not an integer, or `q` exceeds 50 characters
pub async fn read_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<ReadItemQuery>, QueryRejection>,
) -> Result<Json<ReadItemResponse>, AppError> {
    let Path(item_id) = path?;
    let Query(query) = query?;

    if let Some(q) = &query.q {
        if q.chars().count() > MAX_QUERY_LEN {
            return Err(AppError::Validation(format!(
                "q must be at most {MAX_QUERY_LEN} characters"
            )));
        }
    }

    let item = state.store.get(item_id).await?;

    Ok(Json(ReadItemResponse {
        item_id,
        item,
        q: query.q,
    }))
}

/// Create a new item.
///
/// # Endpoint
///
/// `POST /items/`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Widget",
///   "description": "optional",
///   "price": 9.99,
///   "tax": 0.5
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the stored item with its new `item_id`
/// - **Error (422)**: body is not a valid item
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<Item>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(item) = body?;

    let item_id = state.store.create(item.clone()).await?;
    tracing::info!(item_id, "item created");

    Ok((StatusCode::CREATED, Json(ItemResponse::new(item_id, item))))
}

/// Replace the item at `item_id`, creating it if absent.
///
/// # Endpoint
///
/// `PUT /items/{item_id}`
pub async fn replace_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Item>, JsonRejection>,
) -> Result<Json<ItemResponse>, AppError> {
    let Path(item_id) = path?;
    let Json(item) = body?;

    state.store.put(item_id, item.clone()).await?;
    tracing::info!(item_id, "item replaced");

    Ok(Json(ItemResponse::new(item_id, item)))
}

/// Update the fields present in the body.
///
/// # Endpoint
///
/// `PATCH /items/{item_id}`
///
/// # Response
///
/// - **Success (200 OK)**: the item after the update
/// - **Error (404)**: no item stored under `item_id` (empty body)
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ItemUpdate>, JsonRejection>,
) -> Result<Json<ItemResponse>, AppError> {
    let Path(item_id) = path?;
    let Json(update) = body?;

    let item = state
        .store
        .update(item_id, update)
        .await?
        .ok_or(AppError::ItemNotFound)?;
    tracing::info!(item_id, "item updated");

    Ok(Json(ItemResponse::new(item_id, item)))
}

/// Delete an item.
///
/// # Endpoint
///
/// `DELETE /items/{item_id}`
///
/// # Response
///
/// - **204 No Content** when the item was removed
/// - **404 Not Found** when it did not exist
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(item_id) = path?;

    if state.store.delete(item_id).await? {
        tracing::info!(item_id, "item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::ItemNotFound)
    }
}

/// Report whether an item exists without returning it.
///
/// # Endpoint
///
/// `HEAD /items/{item_id}`
///
/// Responds 200 with `X-Item-Exists: true`, or 404.
pub async fn head_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(item_id) = path?;

    if state.store.contains(item_id).await? {
        Ok((StatusCode::OK, [(ITEM_EXISTS_HEADER.clone(), "true")]))
    } else {
        Err(AppError::ItemNotFound)
    }
}

/// `OPTIONS /items/`: 204 with the `Allow` header.
pub async fn options_items() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, [(header::ALLOW, ALLOWED_METHODS)])
}
