use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{CreateItem, ItemResponse, SearchQuery, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        search_items,
        get_item,
        update_item,
        delete_item,
    ),
    components(schemas(ItemResponse, CreateItem, UpdateItem, SearchQuery, ErrorResponse)),
    tags(
        (name = "Items", description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// List all items
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "List of items in insertion order", body = Vec<ItemResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = ItemResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Search items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = "Items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching items; empty for a blank query", body = Vec<ItemResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Query(params): Query<SearchQuery>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    let items = service.search_items(&params.q).await?;
    Ok(Json(items))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<ItemResponse>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Partially update an item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = ItemResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<ItemResponse>> {
    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted successfully"),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<impl IntoResponse> {
    service.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
