//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods suffixed `_tx`
//! take an open transaction instead, so a row and its image link can be
//! committed together.

pub mod client_repo;
pub mod gallery_repo;
pub mod inquiry_repo;
pub mod member_repo;
pub mod team_repo;
pub mod user_repo;

pub use client_repo::ClientRepo;
pub use gallery_repo::GalleryRepo;
pub use inquiry_repo::InquiryRepo;
pub use member_repo::MemberRepo;
pub use team_repo::TeamRepo;
pub use user_repo::UserRepo;
