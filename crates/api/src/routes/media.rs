//! Route definitions for game media.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Game-scoped media routes, merged into `/games`.
///
/// ```text
/// GET    /{id}/media                               get_media
/// PUT    /{id}/media/cover                         set_cover_image
/// POST   /{id}/media/screenshots                   add_screenshots
/// DELETE /{id}/media/screenshots/{index}           delete_screenshot
/// ```
pub fn game_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/media", get(media::get_media))
        .route("/{id}/media/cover", put(media::set_cover_image))
        .route("/{id}/media/screenshots", post(media::add_screenshots))
        .route(
            "/{id}/media/screenshots/{index}",
            delete(media::delete_screenshot),
        )
}

/// Static requirements, mounted under `/media`.
///
/// ```text
/// GET    /requirements                             get_requirements
/// ```
pub fn requirements_router() -> Router<AppState> {
    Router::new().route("/requirements", get(media::get_requirements))
}
