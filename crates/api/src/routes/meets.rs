use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

/// `PUT /api/meets/:id` takes the meet's uuid; `GET` and `DELETE` take its numeric id.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/meets",
            post(handlers::meets::create_meet).get(handlers::meets::list_meets),
        )
        .route(
            "/api/meets/:id",
            get(handlers::meets::get_meet)
                .put(handlers::meets::update_meet)
                .delete(handlers::meets::delete_meet),
        )
}
