//! Shared query parameter types for API handlers.

use serde::Deserialize;
use refocus_core::types::DbId;

/// `GET /submissions?status=` filter.
#[derive(Debug, Deserialize)]
pub struct SubmissionListParams {
    pub status: Option<String>,
}

/// `GET /games/{id}/versions/compare?versionId1=&versionId2=`.
///
/// Both ids are optional at the extractor level so a missing one is reported
/// with the domain message rather than axum's query rejection.
#[derive(Debug, Deserialize)]
pub struct CompareParams {
    #[serde(rename = "versionId1", alias = "version_id1")]
    pub version_id1: Option<DbId>,
    #[serde(rename = "versionId2", alias = "version_id2")]
    pub version_id2: Option<DbId>,
}
