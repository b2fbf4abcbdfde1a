use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of the liveness probe. `status` is `"degraded"` while the object
/// store is unreachable.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Liveness probe: 200 whenever the process serves requests, including while
/// the database is down.
async fn liveness(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = scenestore_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Liveness probe: object store unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(liveness))
}
