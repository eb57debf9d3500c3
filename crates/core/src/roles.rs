//! Well-known role name constants.
//!
//! These must match the values stored in `users.role`.

/// The only role that may sign in to the admin panel and mutate content.
pub const ROLE_ADMIN: &str = "Admin";
