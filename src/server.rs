use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tokio::task;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::PipelineError;
use crate::leaderboard::{self, Category, DEFAULT_LIMIT};
use crate::report_time::now_report_time;
use crate::snapshot;

pub fn router(cfg: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/leaders/{category}", get(leaders_handler))
        .route("/healthz", get(health_handler))
        .with_state(cfg)
}

#[derive(Debug, Deserialize)]
struct LeadersQuery {
    date: Option<NaiveDate>,
    limit: Option<usize>,
    snapshot: Option<bool>,
}

/// `GET /leaders/{category}?date=&limit=&snapshot=`. The category is checked
/// before any upstream work; the blocking pipeline runs off the async
/// runtime. Fatal pipeline errors map to 502.
async fn leaders_handler(
    Path(category): Path<String>,
    Query(query): Query<LeadersQuery>,
    State(cfg): State<Arc<AppConfig>>,
) -> Response {
    let category = match category.parse::<Category>() {
        Ok(category) => category,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };
    let date = query.date.unwrap_or_else(|| now_report_time().date());
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let want_snapshot = query.snapshot.unwrap_or(false);

    let run = task::spawn_blocking(move || {
        let entries = leaderboard::build_leaderboard(&cfg, category, date, limit)?;
        if want_snapshot {
            let key = leaderboard::snapshot_key(category, date);
            match snapshot::write_snapshot(&cfg.snapshot_dir, &key, &entries) {
                Ok(path) => info!("snapshot written to {}", path.display()),
                Err(e) => error!("snapshot write failed: {e:#}"),
            }
        }
        Ok::<_, PipelineError>(entries)
    })
    .await;

    match run {
        Ok(Ok(entries)) => (StatusCode::OK, Json(entries)).into_response(),
        Ok(Err(e)) => {
            error!("leaders request for {category} on {date} failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
        Err(e) => {
            error!("leaders task for {category} did not complete: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "service": "slateboard", "status": "ok" })),
    )
}
