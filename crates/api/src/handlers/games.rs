//! Handlers for game metadata owned by a developer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use refocus_core::error::{ensure_valid, CoreError};
use refocus_core::game::{
    check_editable, validate_category, validate_difficulty, validate_version, MSG_LOCKED_FOR_EDIT,
};
use refocus_core::types::DbId;
use refocus_db::models::game::{CreateGame, UpdateGame};
use refocus_db::repositories::GameRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_owned_game, field_errors};
use crate::middleware::rbac::RequireDeveloper;
use crate::response::DataResponse;
use crate::state::AppState;

/// The optional fields checked beyond what the validator derive covers.
#[derive(Default)]
struct GameFields<'a> {
    version: Option<&'a str>,
    category: Option<&'a str>,
    difficulty: Option<&'a str>,
}

/// Collect validator messages plus the version format and the fixed-set
/// checks on category and difficulty into one error list.
fn game_field_errors(mut errors: Vec<String>, fields: GameFields<'_>) -> Vec<String> {
    let checks = [
        fields.version.map(validate_version),
        fields.category.map(validate_category),
        fields.difficulty.map(validate_difficulty),
    ];
    for check in checks {
        if let Some(Err(CoreError::Validation(msg))) = check {
            errors.push(msg);
        }
    }
    errors
}

/// POST /api/v1/games
///
/// Create a game in `Draft` owned by the caller.
pub async fn create_game(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Json(input): Json<CreateGame>,
) -> AppResult<impl IntoResponse> {
    let mut errors = field_errors(&input);
    if input.title.trim().is_empty() && errors.is_empty() {
        errors.push("Title must not be blank".to_string());
    }
    ensure_valid(game_field_errors(
        errors,
        GameFields {
            version: input.version.as_deref(),
            category: input.category.as_deref(),
            difficulty: input.difficulty.as_deref(),
        },
    ))?;

    let game = GameRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(game_id = game.id, user_id = user.user_id, "Game created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// GET /api/v1/games/{id}
pub async fn get_game(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    Ok(Json(DataResponse { data: game }))
}

/// PUT /api/v1/games/{id}
///
/// Partial metadata update. Refused while the game is locked for review.
pub async fn update_game(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<UpdateGame>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    check_editable(game.is_locked)?;

    let mut errors = field_errors(&input);
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) && errors.is_empty() {
        errors.push("Title must not be blank".to_string());
    }
    ensure_valid(game_field_errors(
        errors,
        GameFields {
            version: input.version.as_deref(),
            category: input.category.as_deref(),
            difficulty: input.difficulty.as_deref(),
        },
    ))?;

    let updated = GameRepo::update(&state.pool, game_id, &input)
        .await?
        .ok_or_else(|| {
            tracing::warn!(game_id, user_id = user.user_id, "Game locked before update landed");
            AppError::Core(CoreError::Locked(MSG_LOCKED_FOR_EDIT.to_string()))
        })?;

    tracing::info!(game_id, user_id = user.user_id, "Game updated");

    Ok(Json(DataResponse { data: updated }))
}
