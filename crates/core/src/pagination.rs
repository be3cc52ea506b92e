//! Pagination helpers shared by list endpoints.

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Convert a 1-based page number into an offset. Missing or non-positive
/// pages mean the first page.
pub fn page_offset(page: Option<i64>, page_size: i64) -> i64 {
    (page.unwrap_or(1).max(1) - 1).saturating_mul(page_size)
}
