// tests/unit_periods.rs
//! Period-window division and bug classification.

use chrono::NaiveDateTime;
use collabnet_core::periods::PeriodWindows;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, FORMAT).unwrap()
}

fn reference_study() -> PeriodWindows {
    PeriodWindows::split(dt("2012-03-18 02:25:40"), dt("2015-02-06 05:18:19"), 5).unwrap()
}

#[test]
fn five_way_split_ends_exactly_on_span_end() {
    let windows = reference_study();
    // The span is not divisible by 5 in whole seconds; the final window
    // absorbs the rounding and ends exactly on the span end.
    let (_, last_end) = windows.bounds(5).unwrap();
    assert_eq!(last_end, dt("2015-02-06 05:18:19"));
}

#[test]
fn windows_partition_the_span() {
    let windows = reference_study();
    let (start, _) = windows.bounds(1).unwrap();
    assert_eq!(start, dt("2012-03-18 02:25:40"));

    let mut covered = chrono::Duration::zero();
    for p in 1..=5 {
        let (ws, we) = windows.bounds(p).unwrap();
        assert!(ws < we);
        covered = covered + (we - ws);
    }
    assert_eq!(
        covered,
        dt("2015-02-06 05:18:19") - dt("2012-03-18 02:25:40")
    );
}

#[test]
fn interval_spanning_two_windows_takes_the_longer_overlap() {
    let windows = reference_study();
    let (w1_start, w1_end) = windows.bounds(1).unwrap();

    // Mostly inside window 1, with a short spill into window 2.
    let first = w1_start + chrono::Duration::days(10);
    let last = w1_end + chrono::Duration::days(5);
    assert_eq!(windows.classify(first, last), Some(1));

    // Mostly inside window 2.
    let first = w1_end - chrono::Duration::days(5);
    let last = w1_end + chrono::Duration::days(60);
    assert_eq!(windows.classify(first, last), Some(2));
}

#[test]
fn exact_tie_resolves_by_last_activity_position() {
    let windows = reference_study();
    let (w1_start, w1_end) = windows.bounds(1).unwrap();
    let (_, w2_end) = windows.bounds(2).unwrap();
    assert_eq!(w2_end - w1_end, w1_end - w1_start);

    // Symmetric straddle of the window-1/window-2 boundary: equal
    // overlap on both sides, so the window holding `last` (window 2)
    // wins.
    let first = w1_end - chrono::Duration::hours(12);
    let last = w1_end + chrono::Duration::hours(12);
    assert_eq!(windows.classify(first, last), Some(2));
}

#[test]
fn activity_outside_the_span_is_unresolved() {
    let windows = reference_study();
    let first = dt("2020-01-01 00:00:00");
    let last = dt("2020-06-01 00:00:00");
    assert_eq!(windows.classify(first, last), None);
}

#[test]
fn k_one_puts_everything_in_the_only_period() {
    let windows =
        PeriodWindows::split(dt("2012-01-01 00:00:00"), dt("2013-01-01 00:00:00"), 1).unwrap();
    let first = dt("2012-03-01 00:00:00");
    let last = dt("2012-04-01 00:00:00");
    assert_eq!(windows.classify(first, last), Some(1));
}
