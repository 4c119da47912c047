//! Request handlers.
//!
//! Developer handlers are owner-scoped: a game that does not exist and a
//! game owned by someone else produce the same 404. Admin handlers see every
//! game. Handlers delegate persistence to the repositories in `refocus_db`
//! and map errors via [`AppError`].

pub mod admin_reviews;
pub mod games;
pub mod license;
pub mod media;
pub mod submission;
pub mod versions;

use refocus_core::error::{validation_messages, CoreError};
use refocus_core::types::DbId;
use refocus_db::models::game::Game;
use refocus_db::repositories::GameRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Message for owner-scoped lookups that must not reveal whether a game exists.
const MSG_GAME_NOT_ACCESSIBLE: &str = "Game not found or you don't have access";

/// Message for a transition whose guarded UPDATE matched no row.
const MSG_STATUS_CHANGED: &str = "Game status changed while the request was being processed";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Field-level `validator` messages for a request body. Empty when valid.
pub(crate) fn field_errors<T: Validate>(input: &T) -> Vec<String> {
    match input.validate() {
        Ok(()) => Vec::new(),
        Err(e) => validation_messages(&e),
    }
}

/// Load a game owned by `developer_id`.
pub(crate) async fn ensure_owned_game(
    pool: &sqlx::PgPool,
    game_id: DbId,
    developer_id: DbId,
) -> AppResult<Game> {
    GameRepo::find_owned(pool, game_id, developer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(MSG_GAME_NOT_ACCESSIBLE.to_string()))
}

/// Load any game (admin view).
pub(crate) async fn ensure_game_exists(pool: &sqlx::PgPool, game_id: DbId) -> AppResult<Game> {
    GameRepo::find_by_id(pool, game_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Game",
                id: game_id,
            })
        })
}

/// Error for a transition that lost a race with another writer.
pub(crate) fn status_changed() -> AppError {
    AppError::Core(CoreError::Conflict(MSG_STATUS_CHANGED.to_string()))
}
