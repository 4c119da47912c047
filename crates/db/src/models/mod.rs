//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (validated with `validator`)
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the entity is developer-editable

pub mod game;
pub mod game_review;
pub mod game_version;
pub mod license;
pub mod requested_change;
