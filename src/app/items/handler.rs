//! Item 处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use super::{
    model::{CreateItemRequest, Item, UpdateItemRequest},
    service::ItemService,
};
use crate::core::{error::CoreError, response::MessageResponse};

#[derive(Clone)]
pub struct AppState {
    pub item_service: ItemService,
}

/// 挂在集合前缀下的路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", put(update_item).delete(delete_item))
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, CoreError> {
    let items = state.item_service.list_items().await?;
    Ok(Json(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), CoreError> {
    let Json(payload) = payload?;
    let item = state.item_service.create_item(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<Item>, CoreError> {
    let Json(payload) = payload?;
    let item = state.item_service.update_item(&id, payload).await?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CoreError> {
    state.item_service.delete_item(&id).await?;
    Ok(Json(MessageResponse::new("Item deleted")))
}
