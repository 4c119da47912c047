pub mod admin;
pub mod games;
pub mod health;
pub mod media;
pub mod submissions;
pub mod versions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                                           create (developer)
/// /games/{id}                                      get, update
/// /games/{id}/submit                               submit for review (POST)
/// /games/{id}/resubmit                             resubmit after changes (POST)
/// /games/{id}/submission                           submission status + timeline
/// /games/{id}/changes/{change_id}/resolve          resolve requested change (PUT)
/// /games/{id}/license                              get, upsert (PUT)
///
/// /games/{id}/versions                             list versions
/// /games/{id}/versions/compare                     compare two versions
/// /games/{id}/versions/approval-history            approved versions
/// /games/{id}/versions/{version_id}                get version
/// /games/{id}/versions/{version_id}/revert         revert (POST)
///
/// /games/{id}/media                                registered media
/// /games/{id}/media/cover                          set cover image (PUT)
/// /games/{id}/media/screenshots                    add screenshots (POST)
/// /games/{id}/media/screenshots/{index}            remove screenshot (DELETE)
/// /media/requirements                              static media requirements
///
/// /submissions                                     caller's games by status
///
/// /admin/reviews/pending                           review queue (admin only)
/// /admin/reviews/games/{id}                        review history
/// /admin/reviews/games/{id}/start                  open a review (POST)
/// /admin/reviews/games/{id}/decision               record decision (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/games",
            games::router()
                .merge(versions::router())
                .merge(media::game_router()),
        )
        .nest("/media", media::requirements_router())
        .nest("/submissions", submissions::router())
        .nest("/admin/reviews", admin::reviews_router())
}
