use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers::{self, AppState};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Related imagery
        .route(
            "/features/:composite_id/gallery",
            get(handlers::get_feature_gallery::<S>),
        )
        .route("/features/gallery", post(handlers::post_feature_gallery::<S>))
}
