//! Handlers for version history: listing, comparison, approval history and
//! revert.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use refocus_core::error::CoreError;
use refocus_core::types::DbId;
use refocus_core::versioning::{
    can_revert_to, check_revert_request, check_revert_target, diff_snapshots, SnapshotDiff,
};
use refocus_db::models::game_version::GameVersion;
use refocus_db::repositories::{GameVersionRepo, SubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_owned_game, status_changed};
use crate::middleware::rbac::RequireDeveloper;
use crate::query::CompareParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One entry of the version list.
#[derive(Debug, Serialize)]
pub struct VersionListItem {
    #[serde(flatten)]
    pub version: GameVersion,
    pub can_revert_to: bool,
}

/// `GET /games/{id}/versions` payload.
#[derive(Debug, Serialize)]
pub struct VersionList {
    /// Label of the current version, e.g. `1.0.1`.
    pub current_version: Option<String>,
    pub versions: Vec<VersionListItem>,
}

/// `GET /games/{id}/versions/compare` payload.
#[derive(Debug, Serialize)]
pub struct VersionComparison {
    pub version1: GameVersion,
    pub version2: GameVersion,
    #[serde(flatten)]
    pub diff: SnapshotDiff,
}

/// Body of `POST /games/{id}/versions/{version_id}/revert`.
#[derive(Debug, Default, Deserialize)]
pub struct RevertInput {
    /// The game's current title, typed to confirm the revert.
    #[serde(default)]
    pub confirmation: Option<String>,
}

/// Returned after a successful revert.
#[derive(Debug, Serialize)]
pub struct RevertReceipt {
    pub reverted_to_version: String,
    pub new_version_id: DbId,
    pub new_version_number: String,
    /// The game's version string after the revert.
    pub game_version: String,
    pub status: String,
    pub is_locked: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_version_exists(
    pool: &sqlx::PgPool,
    game_id: DbId,
    version_id: DbId,
) -> AppResult<GameVersion> {
    GameVersionRepo::find_for_game(pool, game_id, version_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Version",
            id: version_id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/games/{id}/versions
///
/// All versions newest first, each flagged with whether it can be restored.
pub async fn list_versions(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_game(&state.pool, game_id, user.user_id).await?;

    let versions = GameVersionRepo::list_by_game(&state.pool, game_id).await?;
    let current_version = versions
        .iter()
        .find(|v| v.is_current_version)
        .map(|v| v.version_number.clone());

    let versions = versions
        .into_iter()
        .map(|version| {
            let revertible = version
                .status()
                .map(|s| can_revert_to(s, version.is_current_version))
                .unwrap_or(false);
            VersionListItem {
                version,
                can_revert_to: revertible,
            }
        })
        .collect();

    Ok(Json(DataResponse {
        data: VersionList {
            current_version,
            versions,
        },
    }))
}

/// GET /api/v1/games/{id}/versions/{version_id}
pub async fn get_version(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path((game_id, version_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    let version = ensure_version_exists(&state.pool, game_id, version_id).await?;
    Ok(Json(DataResponse { data: version }))
}

/// GET /api/v1/games/{id}/versions/compare?versionId1=&versionId2=
pub async fn compare_versions(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Query(params): Query<CompareParams>,
) -> AppResult<impl IntoResponse> {
    let (Some(id1), Some(id2)) = (params.version_id1, params.version_id2) else {
        return Err(AppError::Core(CoreError::Validation(
            "Both versionId1 and versionId2 are required".to_string(),
        )));
    };

    ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    let version1 = ensure_version_exists(&state.pool, game_id, id1).await?;
    let version2 = ensure_version_exists(&state.pool, game_id, id2).await?;

    let diff = diff_snapshots(&version1.snapshot.0, &version2.snapshot.0);

    Ok(Json(DataResponse {
        data: VersionComparison {
            version1,
            version2,
            diff,
        },
    }))
}

/// GET /api/v1/games/{id}/versions/approval-history
pub async fn approval_history(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    let versions = GameVersionRepo::list_approved(&state.pool, game_id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// POST /api/v1/games/{id}/versions/{version_id}/revert
///
/// Restore a version's snapshot onto the game and reset it to `Draft`.
/// The caller confirms by typing the current title.
pub async fn revert_version(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path((game_id, version_id)): Path<(DbId, DbId)>,
    Json(input): Json<RevertInput>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    check_revert_request(game.is_locked, &game.title, input.confirmation.as_deref())?;

    let target = ensure_version_exists(&state.pool, game_id, version_id).await?;
    check_revert_target(target.status()?)?;

    let (reverted, version) =
        SubmissionRepo::revert_to_version(&state.pool, game_id, user.user_id, &target, &game.title)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    game_id,
                    user_id = user.user_id,
                    version_id,
                    "Revert guard rejected the transition"
                );
                status_changed()
            })?;

    tracing::info!(
        game_id,
        user_id = user.user_id,
        version_id = version.id,
        reverted_to = %target.version_number,
        "Game reverted"
    );

    Ok(Json(DataResponse {
        data: RevertReceipt {
            reverted_to_version: target.version_number,
            new_version_id: version.id,
            new_version_number: version.version_number,
            game_version: reverted.version,
            status: reverted.submission_status,
            is_locked: reverted.is_locked,
        },
    }))
}
