use chrono::Duration;

use crate::models::DateWindow;

/// Number of calendar days in a window, counting both endpoints
///
/// A single-day window (start == end) has length 1. An inverted
/// window yields a non-positive count, which callers treat as empty.
#[inline]
pub fn window_days(window: &DateWindow) -> i64 {
    (window.end - window.start).num_days() + 1
}

/// Widen a window by `slack` days on each side
pub fn expand_window(window: &DateWindow, slack: i64) -> DateWindow {
    DateWindow {
        start: window.start - Duration::days(slack),
        end: window.end + Duration::days(slack),
    }
}

/// Check whether `outer` fully covers `inner`
#[inline]
pub fn covers(outer: &DateWindow, inner: &DateWindow) -> bool {
    outer.start <= inner.start && outer.end >= inner.end
}

/// Inclusive day count of the intersection of two windows
///
/// Returns 0 when the windows are disjoint; windows that touch on a
/// single shared day overlap by 1.
#[inline]
pub fn overlap_days(a: &DateWindow, b: &DateWindow) -> i64 {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    if end < start {
        0
    } else {
        (end - start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateWindow {
        DateWindow {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn test_window_days_counts_both_endpoints() {
        assert_eq!(window_days(&window((2025, 6, 1), (2025, 6, 7))), 7);
        assert_eq!(window_days(&window((2025, 6, 1), (2025, 6, 1))), 1);
    }

    #[test]
    fn test_expand_window() {
        let expanded = expand_window(&window((2025, 6, 10), (2025, 6, 15)), 3);
        assert_eq!(expanded.start, NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
        assert_eq!(expanded.end, NaiveDate::from_ymd_opt(2025, 6, 18).unwrap());
    }

    #[test]
    fn test_expand_window_crosses_month_boundary() {
        let expanded = expand_window(&window((2025, 6, 5), (2025, 6, 10)), 15);
        assert_eq!(expanded.start, NaiveDate::from_ymd_opt(2025, 5, 21).unwrap());
        assert_eq!(expanded.end, NaiveDate::from_ymd_opt(2025, 6, 25).unwrap());
    }

    #[test]
    fn test_covers() {
        let outer = window((2025, 6, 1), (2025, 6, 30));
        assert!(covers(&outer, &window((2025, 6, 5), (2025, 6, 10))));
        assert!(covers(&outer, &outer));
        assert!(!covers(&outer, &window((2025, 5, 31), (2025, 6, 10))));
        assert!(!covers(&outer, &window((2025, 6, 20), (2025, 7, 1))));
    }

    #[test]
    fn test_overlap_days() {
        let a = window((2025, 6, 1), (2025, 6, 10));
        assert_eq!(overlap_days(&a, &window((2025, 6, 6), (2025, 6, 30))), 5);
        assert_eq!(overlap_days(&a, &window((2025, 6, 10), (2025, 6, 20))), 1);
        assert_eq!(overlap_days(&a, &window((2025, 6, 11), (2025, 6, 20))), 0);
        assert_eq!(overlap_days(&a, &a), 10);
    }
}
