//! Pagination helpers shared by list endpoints.

/// Default number of sync log rows per page.
pub const DEFAULT_LOG_LIMIT: i64 = 25;

/// Maximum number of sync log rows per page.
pub const MAX_LOG_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 25, 100), 25);
    }

    #[test]
    fn limit_clamped_to_max() {
        assert_eq!(clamp_limit(Some(500), 25, 100), 100);
    }

    #[test]
    fn limit_clamped_to_at_least_one() {
        assert_eq!(clamp_limit(Some(0), 25, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 25, 100), 1);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
