//! Route definitions for game version history, merged into `/games`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::versions;
use crate::state::AppState;

/// ```text
/// GET    /{id}/versions                            list_versions
/// GET    /{id}/versions/compare                    compare_versions
/// GET    /{id}/versions/approval-history           approval_history
/// GET    /{id}/versions/{version_id}               get_version
/// POST   /{id}/versions/{version_id}/revert        revert_version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/versions", get(versions::list_versions))
        .route("/{id}/versions/compare", get(versions::compare_versions))
        .route(
            "/{id}/versions/approval-history",
            get(versions::approval_history),
        )
        .route("/{id}/versions/{version_id}", get(versions::get_version))
        .route(
            "/{id}/versions/{version_id}/revert",
            post(versions::revert_version),
        )
}
