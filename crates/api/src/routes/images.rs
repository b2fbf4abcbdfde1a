use axum::routing::get;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// `GET /images/{filename}?size=small|medium|large`
pub fn router() -> Router<AppState> {
    Router::new().route("/images/{filename}", get(images::serve))
}
