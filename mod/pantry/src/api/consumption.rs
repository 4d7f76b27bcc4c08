use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::post,
};
use serde::Deserialize;

use carelog_core::ListParams;

use super::{ApiError, AppState, ok_json};
use crate::model::ConsumptionLog;
use crate::service::consumption::RecordConsumptionInput;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items/{id}/consumption",
            post(record_consumption).get(list_consumption),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordBody {
    served_date: Option<String>,
    #[serde(default = "default_servings")]
    servings: u32,
    meal_type: Option<String>,
    note: Option<String>,
}

fn default_servings() -> u32 {
    1
}

async fn record_consumption(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RecordBody>,
) -> Result<Json<ConsumptionLog>, ApiError> {
    ok_json(svc.record_consumption(&id, RecordConsumptionInput {
        served_date: body.served_date,
        servings: body.servings,
        meal_type: body.meal_type,
        note: body.note,
    }))
}

async fn list_consumption(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<carelog_core::ListResult<ConsumptionLog>>, ApiError> {
    ok_json(svc.list_consumption(&id, &params))
}
