//! Route definitions for developer-owned games, their submission workflow
//! and licence declaration.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{games, license, submission};
use crate::state::AppState;

/// Routes mounted under `/games`.
///
/// ```text
/// POST   /                                         create_game
/// GET    /{id}                                     get_game
/// PUT    /{id}                                     update_game
/// POST   /{id}/submit                              submit_game
/// POST   /{id}/resubmit                            resubmit_game
/// GET    /{id}/submission                          get_submission
/// PUT    /{id}/changes/{change_id}/resolve         resolve_change
/// GET    /{id}/license                             get_license
/// PUT    /{id}/license                             upsert_license
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(games::create_game))
        .route("/{id}", get(games::get_game).put(games::update_game))
        .route("/{id}/submit", post(submission::submit_game))
        .route("/{id}/resubmit", post(submission::resubmit_game))
        .route("/{id}/submission", get(submission::get_submission))
        .route(
            "/{id}/changes/{change_id}/resolve",
            put(submission::resolve_change),
        )
        .route(
            "/{id}/license",
            get(license::get_license).put(license::upsert_license),
        )
}
