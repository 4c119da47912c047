//! Pure domain logic for the game submission service.
//!
//! Nothing in this crate touches the database, the network, or the clock
//! beyond reading `Utc::now()` for licence year checks. The DB and API layers
//! call into these modules to decide whether a transition is allowed and what
//! it should produce.

pub mod changes;
pub mod error;
pub mod game;
pub mod license;
pub mod media;
pub mod review;
pub mod roles;
pub mod submission;
pub mod types;
pub mod versioning;
