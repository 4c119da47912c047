//! Handlers for cover image and screenshot metadata.
//!
//! Image bytes are stored elsewhere; these endpoints register URLs and
//! metadata so the submission preconditions can be checked.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use refocus_core::error::CoreError;
use refocus_core::game::{check_editable, MSG_LOCKED_FOR_EDIT};
use refocus_core::media::{
    check_screenshot_addition, check_screenshot_removal, media_requirements, readiness_errors,
    validate_media_url, Screenshot,
};
use refocus_core::types::DbId;
use refocus_db::models::game::Game;
use refocus_db::repositories::GameRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owned_game;
use crate::middleware::rbac::RequireDeveloper;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /games/{id}/media/cover`.
#[derive(Debug, Deserialize)]
pub struct CoverImageInput {
    pub url: String,
}

/// Body of `POST /games/{id}/media/screenshots`.
#[derive(Debug, Deserialize)]
pub struct AddScreenshotsInput {
    pub screenshots: Vec<Screenshot>,
}

/// Media registered on a game and whether it satisfies the requirements.
#[derive(Debug, Serialize)]
pub struct GameMedia {
    pub game_id: DbId,
    pub cover_image_url: Option<String>,
    pub screenshots: Vec<Screenshot>,
    pub screenshot_count: usize,
    pub meets_requirements: bool,
    pub missing: Vec<String>,
}

impl From<Game> for GameMedia {
    fn from(game: Game) -> Self {
        let missing = readiness_errors(game.has_cover_image(), game.screenshot_count());
        Self {
            game_id: game.id,
            screenshot_count: game.screenshot_count(),
            meets_requirements: missing.is_empty(),
            missing,
            cover_image_url: game.cover_image_url,
            screenshots: game.screenshots.0,
        }
    }
}

/// A media write whose guarded UPDATE matched nothing: the game was locked
/// or its screenshot list moved underneath the request.
fn media_write_refused(game_id: DbId, user_id: DbId) -> AppError {
    tracing::warn!(game_id, user_id, "Media write guard rejected the update");
    AppError::Core(CoreError::Conflict(
        "Media changed while the request was being processed".to_string(),
    ))
}

/// GET /api/v1/media/requirements
pub async fn get_requirements() -> impl IntoResponse {
    Json(DataResponse {
        data: media_requirements(),
    })
}

/// GET /api/v1/games/{id}/media
pub async fn get_media(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    Ok(Json(DataResponse {
        data: GameMedia::from(game),
    }))
}

/// PUT /api/v1/games/{id}/media/cover
pub async fn set_cover_image(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<CoverImageInput>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    check_editable(game.is_locked)?;
    validate_media_url(&input.url)?;

    let updated = GameRepo::set_cover_image(&state.pool, game_id, input.url.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Locked(MSG_LOCKED_FOR_EDIT.to_string())))?;

    tracing::info!(game_id, user_id = user.user_id, "Cover image registered");

    Ok(Json(DataResponse {
        data: GameMedia::from(updated),
    }))
}

/// POST /api/v1/games/{id}/media/screenshots
///
/// Append screenshot metadata. The total may not exceed the maximum.
pub async fn add_screenshots(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<AddScreenshotsInput>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    check_editable(game.is_locked)?;

    check_screenshot_addition(game.screenshot_count(), &input.screenshots)?;

    let previous = game.screenshots.0;
    let mut screenshots = previous.clone();
    screenshots.extend(input.screenshots);

    let updated = GameRepo::replace_screenshots(&state.pool, game_id, &previous, &screenshots)
        .await?
        .ok_or_else(|| media_write_refused(game_id, user.user_id))?;

    tracing::info!(
        game_id,
        user_id = user.user_id,
        screenshot_count = updated.screenshot_count(),
        "Screenshots added"
    );

    Ok(Json(DataResponse {
        data: GameMedia::from(updated),
    }))
}

/// DELETE /api/v1/games/{id}/media/screenshots/{index}
///
/// Remove one screenshot by its zero-based position.
pub async fn delete_screenshot(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path((game_id, index)): Path<(DbId, usize)>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    check_editable(game.is_locked)?;

    check_screenshot_removal(game.screenshot_count(), index)?;

    let previous = game.screenshots.0;
    let mut screenshots = previous.clone();
    screenshots.remove(index);

    let updated = GameRepo::replace_screenshots(&state.pool, game_id, &previous, &screenshots)
        .await?
        .ok_or_else(|| media_write_refused(game_id, user.user_id))?;

    tracing::info!(game_id, user_id = user.user_id, index, "Screenshot removed");

    Ok(Json(DataResponse {
        data: GameMedia::from(updated),
    }))
}
