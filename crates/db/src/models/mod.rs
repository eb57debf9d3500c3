//! Row models and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) applied with `COALESCE`

pub mod client;
pub mod gallery;
pub mod inquiry;
pub mod member;
pub mod team;
pub mod user;
