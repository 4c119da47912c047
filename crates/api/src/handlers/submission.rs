//! Handlers for the developer side of the submission workflow: submit,
//! resubmit, submission status, and resolving requested changes.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use refocus_core::changes::{summarize, ChangeState, ResolutionSummary};
use refocus_core::error::CoreError;
use refocus_core::submission::{
    build_timeline, check_resubmit, check_submit, SubmissionNotes, SubmissionReadiness,
    SubmissionStatus, TimelineEntry, ESTIMATED_REVIEW_TIME,
};
use refocus_core::types::{DbId, Timestamp};
use refocus_core::versioning::ChangeLogEntry;
use refocus_db::models::game::Game;
use refocus_db::models::game_version::GameVersion;
use refocus_db::models::license::License;
use refocus_db::models::requested_change::RequestedChange;
use refocus_db::repositories::submission_repo::{EntryNotes, ReviewEntry};
use refocus_db::repositories::{
    GameRepo, GameVersionRepo, LicenseRepo, RequestedChangeRepo, SubmissionRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_owned_game, status_changed};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireDeveloper;
use crate::query::SubmissionListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /games/{id}/submit` and `POST /games/{id}/resubmit`.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitInput {
    #[serde(default)]
    pub change_log: Option<String>,
    #[serde(default)]
    pub changes: Vec<ChangeLogEntry>,
    /// Optional label such as `stable` or `beta` recorded on the version.
    #[serde(default)]
    pub version_tag: Option<String>,
}

impl SubmitInput {
    fn notes(&self) -> SubmissionNotes<'_> {
        SubmissionNotes {
            change_log: self.change_log.as_deref(),
            changes: &self.changes,
            version_tag: self.version_tag.as_deref(),
        }
    }
}

/// Returned when a game enters review.
#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub game_id: DbId,
    pub version_id: DbId,
    pub version_number: String,
    pub version_tag: Option<String>,
    pub status: String,
    pub is_locked: bool,
    pub submitted_for_review_at: Option<Timestamp>,
    pub estimated_review_time: &'static str,
}

impl SubmissionReceipt {
    fn new(game: &Game, version: &GameVersion) -> Self {
        Self {
            game_id: game.id,
            version_id: version.id,
            version_number: version.version_number.clone(),
            version_tag: version.version_tag.clone(),
            status: game.submission_status.clone(),
            is_locked: game.is_locked,
            submitted_for_review_at: game.submitted_for_review_at,
            estimated_review_time: ESTIMATED_REVIEW_TIME,
        }
    }
}

/// Full submission state of one game.
#[derive(Debug, Serialize)]
pub struct SubmissionView {
    pub game_id: DbId,
    pub title: String,
    /// Label of the current version, once the game has one.
    pub current_version: Option<String>,
    pub status: SubmissionStatus,
    pub is_locked: bool,
    pub submitted_for_review_at: Option<Timestamp>,
    pub last_reviewed_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub rejected_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub reviewer_comments: Option<String>,
    pub requested_changes: Vec<RequestedChange>,
    pub timeline: Vec<TimelineEntry>,
}

/// One row of `GET /submissions`.
#[derive(Debug, Serialize)]
pub struct SubmissionSummary {
    pub game_id: DbId,
    pub title: String,
    pub status: String,
    pub is_locked: bool,
    pub submitted_for_review_at: Option<Timestamp>,
    pub last_reviewed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl From<Game> for SubmissionSummary {
    fn from(game: Game) -> Self {
        Self {
            game_id: game.id,
            title: game.title,
            status: game.submission_status,
            is_locked: game.is_locked,
            submitted_for_review_at: game.submitted_for_review_at,
            last_reviewed_at: game.last_reviewed_at,
            updated_at: game.updated_at,
        }
    }
}

/// Returned after resolving a requested change.
#[derive(Debug, Serialize)]
pub struct ResolvedChange {
    pub change: RequestedChange,
    #[serde(flatten)]
    pub summary: ResolutionSummary,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn readiness(game: &Game, license: Option<&License>) -> SubmissionReadiness {
    SubmissionReadiness {
        has_cover_image: game.has_cover_image(),
        screenshot_count: game.screenshot_count(),
        license_complete: license.is_some_and(License::is_complete),
    }
}

/// Persist entry into review and shape the response.
async fn enter_review(
    state: &AppState,
    game_id: DbId,
    user: &AuthUser,
    entry: ReviewEntry,
    input: SubmitInput,
) -> AppResult<SubmissionReceipt> {
    let notes = EntryNotes {
        change_log: input.change_log,
        changes: input.changes,
        version_tag: input.version_tag.map(|t| t.trim().to_string()),
    };

    let (game, version) =
        SubmissionRepo::enter_review(&state.pool, game_id, user.user_id, entry, &notes)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    game_id,
                    user_id = user.user_id,
                    entry = ?entry,
                    "Review entry guard rejected the transition"
                );
                status_changed()
            })?;

    tracing::info!(
        game_id,
        user_id = user.user_id,
        version_id = version.id,
        version_number = %version.version_number,
        entry = ?entry,
        "Game entered review"
    );

    Ok(SubmissionReceipt::new(&game, &version))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/games/{id}/submit
///
/// Move a `Draft` game into review and lock it.
pub async fn submit_game(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<SubmitInput>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    let license = LicenseRepo::find_by_game(&state.pool, game_id).await?;

    check_submit(
        game.status()?,
        &readiness(&game, license.as_ref()),
        &input.notes(),
    )?;

    let receipt = enter_review(&state, game_id, &user, ReviewEntry::Submit, input).await?;
    Ok(Json(DataResponse { data: receipt }))
}

/// POST /api/v1/games/{id}/resubmit
///
/// Return a `Changes Requested` game to review once every critical change
/// is resolved.
pub async fn resubmit_game(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<SubmitInput>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    let license = LicenseRepo::find_by_game(&state.pool, game_id).await?;
    let ledger: Vec<ChangeState> = RequestedChangeRepo::list_by_game(&state.pool, game_id)
        .await?
        .iter()
        .map(RequestedChange::state)
        .collect();

    check_resubmit(
        game.status()?,
        &readiness(&game, license.as_ref()),
        &ledger,
        &input.notes(),
    )?;

    let receipt = enter_review(&state, game_id, &user, ReviewEntry::Resubmit, input).await?;
    Ok(Json(DataResponse { data: receipt }))
}

/// GET /api/v1/games/{id}/submission
pub async fn get_submission(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    let status = game.status()?;
    let requested_changes = RequestedChangeRepo::list_by_game(&state.pool, game_id).await?;
    let current_version = GameVersionRepo::find_current(&state.pool, game_id)
        .await?
        .map(|v| v.version_number);
    let timeline = build_timeline(status, &game.dates());

    Ok(Json(DataResponse {
        data: SubmissionView {
            game_id: game.id,
            title: game.title,
            current_version,
            status,
            is_locked: game.is_locked,
            submitted_for_review_at: game.submitted_for_review_at,
            last_reviewed_at: game.last_reviewed_at,
            approved_at: game.approved_at,
            rejected_at: game.rejected_at,
            rejection_reason: game.rejection_reason,
            reviewer_comments: game.reviewer_comments,
            requested_changes,
            timeline,
        },
    }))
}

/// GET /api/v1/submissions?status=
///
/// The caller's games, optionally filtered by submission status.
pub async fn list_submissions(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    let status = params
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(SubmissionStatus::parse)
        .transpose()?;

    let games = GameRepo::list_by_developer(&state.pool, user.user_id, status).await?;
    let data: Vec<SubmissionSummary> = games.into_iter().map(SubmissionSummary::from).collect();

    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/games/{id}/changes/{change_id}/resolve
///
/// Mark a requested change resolved. Idempotent; no status transition.
pub async fn resolve_change(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path((game_id, change_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_game(&state.pool, game_id, user.user_id).await?;

    let change = RequestedChangeRepo::resolve(&state.pool, game_id, change_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Requested change",
            id: change_id,
        }))?;

    let ledger: Vec<ChangeState> = RequestedChangeRepo::list_by_game(&state.pool, game_id)
        .await?
        .iter()
        .map(RequestedChange::state)
        .collect();
    let summary = summarize(&ledger);

    tracing::info!(
        game_id,
        user_id = user.user_id,
        change_id,
        remaining_changes = summary.remaining_changes,
        "Requested change resolved"
    );

    Ok(Json(DataResponse {
        data: ResolvedChange { change, summary },
    }))
}
