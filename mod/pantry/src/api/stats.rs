use axum::{Json, Router, extract::State, routing::get};

use super::{ApiError, AppState, ok_json};
use crate::service::stats::StatsSummary;

pub fn routes() -> Router<AppState> {
    Router::new().route("/stats/summary", get(stats_summary))
}

async fn stats_summary(
    State(svc): State<AppState>,
) -> Result<Json<StatsSummary>, ApiError> {
    ok_json(svc.stats_summary())
}
