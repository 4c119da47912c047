//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. The developer and admin route trees each
//! take one of these, so capability checks happen at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use refocus_core::error::CoreError;
use refocus_core::roles::{ROLE_ADMIN, ROLE_DEVELOPER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `developer` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// Ownership is still enforced per game by the handlers; an admin calling a
/// developer endpoint only sees games they own.
pub struct RequireDeveloper(pub AuthUser);

impl FromRequestParts<AppState> for RequireDeveloper {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_DEVELOPER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Developer or Admin role required".into(),
            )));
        }
        Ok(RequireDeveloper(user))
    }
}
