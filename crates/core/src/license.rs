//! Licence declaration rules.
//!
//! A game needs a complete ownership declaration before it may enter
//! review. The workflow only asks [`is_complete`]; the field checks below
//! guard the licence upsert endpoint.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_valid, CoreError};

/// Accepted ownership status values.
pub const VALID_OWNERSHIP_STATUSES: &[&str] =
    &["Sole Owner", "Co-Owner", "Licensed", "Work for Hire"];

/// Earliest copyright year accepted.
pub const MIN_COPYRIGHT_YEAR: i32 = 1970;

/// Message reported by submission checks when the declaration is missing
/// or incomplete.
pub const MSG_LICENSE_REQUIRED: &str = "A completed license declaration is required";

/// The four declarations a developer must confirm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseDeclarations {
    pub ownership_confirmed: bool,
    pub no_infringement: bool,
    pub accurate_information: bool,
    pub agreement_accepted: bool,
}

impl LicenseDeclarations {
    /// Names of declarations that have not been confirmed.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.ownership_confirmed {
            missing.push("ownership_confirmed");
        }
        if !self.no_infringement {
            missing.push("no_infringement");
        }
        if !self.accurate_information {
            missing.push("accurate_information");
        }
        if !self.agreement_accepted {
            missing.push("agreement_accepted");
        }
        missing
    }
}

/// A licence is complete when a copyright holder is named and every
/// declaration is confirmed.
pub fn is_complete(copyright_holder: &str, declarations: &LicenseDeclarations) -> bool {
    !copyright_holder.trim().is_empty() && declarations.missing().is_empty()
}

/// Validate the fields of a licence upsert. Declarations may still be
/// incomplete here; completeness is enforced at submission time.
pub fn validate_license_fields(
    ownership_status: &str,
    copyright_holder: &str,
    copyright_year: i32,
) -> Result<(), CoreError> {
    let mut errors = Vec::new();

    if !VALID_OWNERSHIP_STATUSES.contains(&ownership_status) {
        errors.push(format!(
            "Invalid ownership status '{ownership_status}'. Must be one of: {}",
            VALID_OWNERSHIP_STATUSES.join(", ")
        ));
    }
    if copyright_holder.trim().is_empty() {
        errors.push("Copyright holder is required".to_string());
    }

    let current_year = chrono::Utc::now().year();
    if copyright_year < MIN_COPYRIGHT_YEAR || copyright_year > current_year {
        errors.push(format!(
            "Copyright year must be between {MIN_COPYRIGHT_YEAR} and {current_year}"
        ));
    }

    ensure_valid(errors)
}
