//! Game metadata rules: categories, difficulty levels, the developer's
//! version string, and the edit lock.

use crate::error::CoreError;

/// Version a new game starts at when the developer does not give one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Focus-training categories a game can be filed under.
pub const VALID_CATEGORIES: &[&str] = &[
    "memory",
    "attention",
    "puzzle",
    "reaction",
    "focus",
    "relaxation",
    "other",
];

/// Difficulty levels.
pub const VALID_DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];

/// Validate that a category is one of [`VALID_CATEGORIES`].
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

/// Validate that a difficulty is one of [`VALID_DIFFICULTIES`].
pub fn validate_difficulty(difficulty: &str) -> Result<(), CoreError> {
    if VALID_DIFFICULTIES.contains(&difficulty) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid difficulty '{difficulty}'. Must be one of: {}",
            VALID_DIFFICULTIES.join(", ")
        )))
    }
}

/// Validate a `MAJOR.MINOR.PATCH` version string, e.g. `1.0.2`.
///
/// Build metadata (`+...`) is not accepted: it is reserved for
/// disambiguating repeated version labels in the history.
pub fn validate_version(version: &str) -> Result<(), CoreError> {
    let parts: Vec<&str> = version.split('.').collect();
    let well_formed = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.len() <= 9 && p.bytes().all(|b| b.is_ascii_digit()));
    if well_formed {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid version '{version}'. Use MAJOR.MINOR.PATCH, e.g. {DEFAULT_VERSION}"
        )))
    }
}

/// Message reported when a developer edits a game under review.
pub const MSG_LOCKED_FOR_EDIT: &str = "Game is locked during review and cannot be edited";

/// Reject developer edits while the game is locked for review.
pub fn check_editable(is_locked: bool) -> Result<(), CoreError> {
    if is_locked {
        return Err(CoreError::Locked(MSG_LOCKED_FOR_EDIT.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn known_categories_accepted() {
        for c in VALID_CATEGORIES {
            assert!(validate_category(c).is_ok());
        }
    }

    #[test]
    fn unknown_category_rejected() {
        let err = validate_category("shooter").unwrap_err();
        assert!(err.to_string().contains("Invalid category"));
    }

    #[test]
    fn difficulty_is_case_sensitive() {
        assert!(validate_difficulty("medium").is_ok());
        assert!(validate_difficulty("Medium").is_err());
    }

    #[test]
    fn semantic_versions_accepted() {
        assert!(validate_version(DEFAULT_VERSION).is_ok());
        assert!(validate_version("2.10.0").is_ok());
    }

    #[test]
    fn malformed_versions_rejected() {
        for v in ["1.0", "1.0.0.0", "v1.0.0", "1..0", "1.0.0+2", ""] {
            let err = validate_version(v).unwrap_err();
            assert!(err.to_string().contains("MAJOR.MINOR.PATCH"), "{v}");
        }
    }

    #[test]
    fn locked_game_is_not_editable() {
        assert_matches!(check_editable(true), Err(CoreError::Locked(_)));
        assert!(check_editable(false).is_ok());
    }
}
