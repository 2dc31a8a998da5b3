//! Small conversions shared by the repositories.

/// Counters are stored as `BIGINT`; anything outside `u32` is clamped.
pub(crate) fn count_from_db(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
