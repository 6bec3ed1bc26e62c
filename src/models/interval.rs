//! Fixed review interval table.

/// Days to wait before the review at each index. Past the end of the table
/// there is no further review and the problem counts as mastered.
pub const REVIEW_INTERVALS: [u32; 3] = [3, 7, 30];

/// Returns the interval in days for a zero-based review index.
pub fn interval_for(review_count: u32) -> Option<u32> {
    REVIEW_INTERVALS.get(review_count as usize).copied()
}
