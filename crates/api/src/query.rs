//! Query string types shared across handler modules.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?max_limit=` used by public listings. Zero or negative means "no limit".
#[derive(Debug, Default, Deserialize)]
pub struct MaxLimitParams {
    pub max_limit: Option<i64>,
}

impl MaxLimitParams {
    pub fn limit(&self) -> Option<i64> {
        self.max_limit.filter(|n| *n > 0)
    }
}
