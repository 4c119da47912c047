//! Route definitions for the caller's submission list.

use axum::routing::get;
use axum::Router;

use crate::handlers::submission;
use crate::state::AppState;

/// ```text
/// GET    /                                         list_submissions
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(submission::list_submissions))
}
