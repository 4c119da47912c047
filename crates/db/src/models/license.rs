//! Licence declaration entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use refocus_core::license::{is_complete, LicenseDeclarations};
use refocus_core::types::{DbId, Timestamp};

/// A row from the `licenses` table. One per game.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct License {
    pub id: DbId,
    pub game_id: DbId,
    pub engine_name: Option<String>,
    pub engine_license_type: Option<String>,
    pub ownership_status: String,
    pub copyright_holder: String,
    pub copyright_year: i32,
    pub ownership_confirmed: bool,
    pub no_infringement: bool,
    pub accurate_information: bool,
    pub agreement_accepted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl License {
    pub fn declarations(&self) -> LicenseDeclarations {
        LicenseDeclarations {
            ownership_confirmed: self.ownership_confirmed,
            no_infringement: self.no_infringement,
            accurate_information: self.accurate_information,
            agreement_accepted: self.agreement_accepted,
        }
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.copyright_holder, &self.declarations())
    }
}

/// DTO for creating or replacing a game's licence declaration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertLicense {
    #[validate(length(max = 200, message = "Engine name must not exceed 200 characters"))]
    pub engine_name: Option<String>,
    #[validate(length(max = 200, message = "Engine licence type must not exceed 200 characters"))]
    pub engine_license_type: Option<String>,
    pub ownership_status: String,
    #[validate(length(max = 200, message = "Copyright holder must not exceed 200 characters"))]
    pub copyright_holder: String,
    pub copyright_year: i32,
    #[serde(default)]
    pub declarations: LicenseDeclarations,
}
