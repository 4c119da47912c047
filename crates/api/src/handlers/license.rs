//! Handlers for a game's licence declaration.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use refocus_core::error::{ensure_valid, CoreError};
use refocus_core::game::{check_editable, MSG_LOCKED_FOR_EDIT};
use refocus_core::license::validate_license_fields;
use refocus_core::types::DbId;
use refocus_db::models::license::UpsertLicense;
use refocus_db::repositories::LicenseRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_owned_game, field_errors};
use crate::middleware::rbac::RequireDeveloper;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/games/{id}/license
pub async fn get_license(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_owned_game(&state.pool, game_id, user.user_id).await?;

    let license = LicenseRepo::find_by_game(&state.pool, game_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "License",
            id: game_id,
        }))?;

    Ok(Json(DataResponse { data: license }))
}

/// PUT /api/v1/games/{id}/license
///
/// Create or replace the declaration. Declarations may be incomplete here;
/// completeness is only required to submit.
pub async fn upsert_license(
    RequireDeveloper(user): RequireDeveloper,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<UpsertLicense>,
) -> AppResult<impl IntoResponse> {
    let game = ensure_owned_game(&state.pool, game_id, user.user_id).await?;
    check_editable(game.is_locked)?;

    let mut errors = field_errors(&input);
    match validate_license_fields(
        &input.ownership_status,
        &input.copyright_holder,
        input.copyright_year,
    ) {
        Err(CoreError::InvalidInput(list)) => errors.extend(list),
        Err(other) => return Err(other.into()),
        Ok(()) => {}
    }
    ensure_valid(errors)?;

    let license = LicenseRepo::upsert(&state.pool, game_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Locked(MSG_LOCKED_FOR_EDIT.to_string())))?;

    tracing::info!(
        game_id,
        user_id = user.user_id,
        complete = license.is_complete(),
        "License declaration saved"
    );

    Ok(Json(DataResponse { data: license }))
}
