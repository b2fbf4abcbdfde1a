use axum::routing::get;
use axum::Router;

use crate::handlers::objects;
use crate::state::AppState;

/// Routes for the object resource.
///
/// ```text
/// GET    /objects          -> list
/// POST   /objects          -> create (one or many)
/// GET    /objects/{id}     -> get_by_id
/// PUT    /objects/{id}     -> update
/// DELETE /objects/{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/objects", get(objects::list).post(objects::create))
        .route(
            "/objects/{id}",
            get(objects::get_by_id)
                .put(objects::update)
                .delete(objects::delete),
        )
}
