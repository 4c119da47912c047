//! Route definitions for the admin review queue.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin_reviews;
use crate::state::AppState;

/// Routes mounted under `/admin/reviews`. Every handler requires the
/// `admin` role.
///
/// ```text
/// GET    /pending                                  list_pending
/// GET    /games/{id}                               review_history
/// POST   /games/{id}/start                         start_review
/// POST   /games/{id}/decision                      record_decision
/// ```
pub fn reviews_router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(admin_reviews::list_pending))
        .route("/games/{id}", get(admin_reviews::review_history))
        .route("/games/{id}/start", post(admin_reviews::start_review))
        .route("/games/{id}/decision", post(admin_reviews::record_decision))
}
