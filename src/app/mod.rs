//! 应用层

pub mod items;

use axum::{middleware, response::Json, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::{middleware::request_logging_middleware, response::MessageResponse};
use crate::infrastructure::store::ItemStore;
use items::{handler::AppState, service::ItemService};

/// Item 集合的路径前缀
pub const ITEMS_PATH: &str = "/api/items";

/// 组装完整的路由：存活检查、集合路由和中间件
pub fn router(store: Arc<dyn ItemStore>) -> Router {
    let state = AppState {
        item_service: ItemService::new(store),
    };

    Router::new()
        .route("/", get(root))
        .nest(ITEMS_PATH, items::handler::routes())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Backend API is running"))
}
