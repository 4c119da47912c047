//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Status transitions live in
//! [`SubmissionRepo`] and [`GameReviewRepo::record_decision`]; they run in
//! a transaction and guard on the expected status so a concurrent
//! transition makes them return `None` instead of double-applying.

pub mod game_repo;
pub mod game_review_repo;
pub mod game_version_repo;
pub mod license_repo;
pub mod requested_change_repo;
pub mod submission_repo;

pub use game_repo::GameRepo;
pub use game_review_repo::GameReviewRepo;
pub use game_version_repo::GameVersionRepo;
pub use license_repo::LicenseRepo;
pub use requested_change_repo::RequestedChangeRepo;
pub use submission_repo::SubmissionRepo;
