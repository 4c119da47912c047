//! Handlers for the reviewer side of the workflow (admin only).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use refocus_core::review::{check_review_start, validate_decision, DecisionInput};
use refocus_core::types::{DbId, Timestamp};
use refocus_db::models::game::Game;
use refocus_db::models::game_review::GameReview;
use refocus_db::models::requested_change::RequestedChange;
use refocus_db::repositories::{GameRepo, GameReviewRepo, RequestedChangeRepo};

use crate::error::AppResult;
use crate::handlers::{ensure_game_exists, status_changed};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// One game waiting in the review queue.
#[derive(Debug, Serialize)]
pub struct PendingReview {
    pub game_id: DbId,
    pub developer_id: DbId,
    pub title: String,
    pub version: String,
    pub category: Option<String>,
    pub submitted_for_review_at: Option<Timestamp>,
}

impl From<Game> for PendingReview {
    fn from(game: Game) -> Self {
        Self {
            game_id: game.id,
            developer_id: game.developer_id,
            title: game.title,
            version: game.version,
            category: game.category,
            submitted_for_review_at: game.submitted_for_review_at,
        }
    }
}

/// Returned when a reviewer opens a review.
#[derive(Debug, Serialize)]
pub struct StartedReview {
    pub review_id: DbId,
    pub game_id: DbId,
    pub game_title: String,
    pub version_id: Option<DbId>,
    pub started_at: Timestamp,
}

/// Everything a decision changed.
#[derive(Debug, Serialize)]
pub struct DecisionResult {
    pub game: Game,
    pub review: GameReview,
    pub requested_changes: Vec<RequestedChange>,
}

/// Review history of one game.
#[derive(Debug, Serialize)]
pub struct ReviewHistory {
    pub game: Game,
    pub reviews: Vec<GameReview>,
    pub requested_changes: Vec<RequestedChange>,
}

/// GET /api/v1/admin/reviews/pending
///
/// Games in review, oldest submission first.
pub async fn list_pending(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let games = GameRepo::list_in_review(&state.pool).await?;
    let data: Vec<PendingReview> = games.into_iter().map(PendingReview::from).collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/reviews/games/{id}/start
///
/// Open a review record. Does not change the game.
pub async fn start_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_game_exists(&state.pool, game_id).await?;
    check_review_start(game.status()?)?;

    let review = GameReviewRepo::start(&state.pool, game_id, admin.user_id).await?;

    tracing::info!(
        game_id,
        user_id = admin.user_id,
        review_id = review.id,
        "Review started"
    );

    Ok(Json(DataResponse {
        data: StartedReview {
            review_id: review.id,
            game_id,
            game_title: game.title,
            version_id: review.version_id,
            started_at: review.started_at,
        },
    }))
}

/// POST /api/v1/admin/reviews/games/{id}/decision
///
/// Approve, request changes, or reject a game that is in review.
pub async fn record_decision(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<DecisionInput>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_game_exists(&state.pool, game_id).await?;
    validate_decision(game.status()?, &input)?;

    let outcome = GameReviewRepo::record_decision(&state.pool, game_id, admin.user_id, &input)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                game_id,
                user_id = admin.user_id,
                decision = %input.status,
                "Decision guard rejected the transition"
            );
            status_changed()
        })?;

    tracing::info!(
        game_id,
        user_id = admin.user_id,
        version_id = ?outcome.review.version_id,
        decision = %input.status,
        requested_changes = outcome.requested_changes.len(),
        "Review decision recorded"
    );

    Ok(Json(DataResponse {
        data: DecisionResult {
            game: outcome.game,
            review: outcome.review,
            requested_changes: outcome.requested_changes,
        },
    }))
}

/// GET /api/v1/admin/reviews/games/{id}
pub async fn review_history(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_game_exists(&state.pool, game_id).await?;
    let reviews = GameReviewRepo::list_by_game(&state.pool, game_id).await?;
    let requested_changes = RequestedChangeRepo::list_by_game(&state.pool, game_id).await?;

    Ok(Json(DataResponse {
        data: ReviewHistory {
            game,
            reviews,
            requested_changes,
        },
    }))
}
