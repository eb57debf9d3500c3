//! Domain building blocks shared by the database and HTTP layers.
//!
//! Nothing in this crate talks to PostgreSQL or HTTP. It holds the id and
//! timestamp aliases, the domain error type, status vocabularies, and the
//! on-disk image store used by every entity that carries an image link.

pub mod client;
pub mod error;
pub mod image_store;
pub mod images;
pub mod inquiry;
pub mod member;
pub mod roles;
pub mod types;
pub mod validation;
