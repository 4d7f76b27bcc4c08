use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::error;

use super::AppState;

/// Administrative one-shot endpoints. POST only; other methods get 405
/// from the router's method routing.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/maintenance/backfill-last-recorded",
        post(backfill_last_recorded),
    )
}

/// Run the lastRecordedAt backfill and return the full per-item report.
///
/// Per-item failures are part of the report; only a failure to scan the
/// collection at all produces the 500 shape.
async fn backfill_last_recorded(State(svc): State<AppState>) -> Response {
    match svc.run_backfill() {
        Ok(report) => {
            let message = format!(
                "backfill completed: {} updated, {} skipped, {} errors",
                report.updated, report.skipped, report.errors
            );
            let body = serde_json::json!({
                "success": true,
                "message": message,
                "result": {
                    "updated": report.updated,
                    "skipped": report.skipped,
                    "errors": report.errors,
                },
                "details": report.details,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "backfill run failed");
            let body = serde_json::json!({
                "success": false,
                "error": e.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
