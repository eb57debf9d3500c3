pub mod auth;
pub mod clients;
pub mod gallery;
pub mod inquiries;
pub mod members;
pub mod ping;
pub mod teams;
