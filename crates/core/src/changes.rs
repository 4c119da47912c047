//! Requested-change ledger rules.
//!
//! A reviewer who asks for changes leaves one ledger entry per fix. Entries
//! carry a priority; only `Critical` entries block resubmission.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Known change categories.
pub const VALID_CHANGE_CATEGORIES: &[&str] = &[
    "Functionality",
    "Performance",
    "UI/UX",
    "Content",
    "Policy",
    "Accessibility",
    "Other",
];

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a requested change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChangePriority {
    Low,
    Medium,
    High,
    Critical,
}

impl ChangePriority {
    /// Return the priority name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Parse a priority string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChangePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ledger queries
// ---------------------------------------------------------------------------

/// The two facts about a ledger entry the workflow cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeState {
    pub priority: ChangePriority,
    pub resolved: bool,
}

/// Result of resolving one change, reported back to the developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub all_changes_resolved: bool,
    pub remaining_changes: usize,
}

/// Count unresolved `Critical` entries.
pub fn open_critical_count(changes: &[ChangeState]) -> usize {
    changes
        .iter()
        .filter(|c| c.priority == ChangePriority::Critical && !c.resolved)
        .count()
}

/// Summarise the ledger after a resolution. Informational only.
pub fn summarize(changes: &[ChangeState]) -> ResolutionSummary {
    let remaining_changes = changes.iter().filter(|c| !c.resolved).count();
    ResolutionSummary {
        all_changes_resolved: remaining_changes == 0,
        remaining_changes,
    }
}

/// Validate that a category is one of [`VALID_CHANGE_CATEGORIES`].
pub fn validate_change_category(category: &str) -> Result<(), CoreError> {
    if VALID_CHANGE_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid change category '{category}'. Must be one of: {}",
            VALID_CHANGE_CATEGORIES.join(", ")
        )))
    }
}
