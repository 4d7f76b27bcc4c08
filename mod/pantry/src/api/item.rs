use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;

use carelog_core::ListParams;

use super::{ApiError, AppState, ok_json};
use crate::model::Item;
use crate::service::item::{CreateItemInput, ItemFilters};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route("/items/{id}", get(get_item).patch(update_item).delete(delete_item))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateItemBody {
    name: String,
    category: Option<String>,
    unit: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemQuery {
    #[serde(flatten)]
    params: ListParams,
    category: Option<String>,
}

async fn create_item(
    State(svc): State<AppState>,
    Json(body): Json<CreateItemBody>,
) -> Result<Json<Item>, ApiError> {
    ok_json(svc.create_item(CreateItemInput {
        name: body.name,
        category: body.category,
        unit: body.unit,
        description: body.description,
    }))
}

async fn get_item(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    ok_json(svc.get_item(&id))
}

async fn list_items(
    State(svc): State<AppState>,
    Query(q): Query<ItemQuery>,
) -> Result<Json<carelog_core::ListResult<Item>>, ApiError> {
    let filters = ItemFilters {
        category: q.category,
    };
    ok_json(svc.list_items(&q.params, &filters))
}

async fn update_item(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<Item>, ApiError> {
    ok_json(svc.update_item(&id, patch))
}

async fn delete_item(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    svc.delete_item(&id).map_err(ApiError::from)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
