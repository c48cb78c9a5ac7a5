//! Behavior of the `meetings()` and `meetings_between()` iterators.
//!
//! The first rotation of the 2025 year, for reference:
//!
//! ```text
//! Thu 08-14 A   Fri 08-15 B   Mon 08-18 C   Tue 08-19 D
//! Wed 08-20 E   Thu 08-21 F   Fri 08-22 G   Mon 08-25 A
//! ```

use jiff::civil::{date, Date, Weekday};
use letterday::{LunchOption, Meeting, Period, RotationLabel, SchoolCalendar};

fn period(n: u8) -> Period {
    Period::new(n).unwrap()
}

fn dates(meetings: &[Meeting]) -> Vec<Date> {
    meetings.iter().map(|m| m.date).collect()
}

// =============================================================================
// Laziness
// =============================================================================

#[test]
fn meetings_is_lazy() {
    let calendar = SchoolCalendar::default();
    // Unbounded, so only `take` keeps this finite.
    let first: Vec<_> = calendar
        .meetings(period(1), date(2025, 8, 14), LunchOption::Second)
        .take(1)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(first.len(), 1);
}

#[test]
fn meetings_run_for_years() {
    let calendar = SchoolCalendar::default();
    let last = calendar
        .meetings(period(4), date(2025, 8, 14), LunchOption::Second)
        .take(1000)
        .last()
        .unwrap()
        .unwrap();
    assert!(last.date > date(2027, 1, 1));
}

// =============================================================================
// Ordering and content
// =============================================================================

#[test]
fn meetings_skip_days_without_the_period() {
    let calendar = SchoolCalendar::default();
    let found: Vec<Meeting> = calendar
        .meetings(period(1), date(2025, 8, 14), LunchOption::Second)
        .take(5)
        .collect::<Result<_, _>>()
        .unwrap();
    // Period 1 is absent on D and G.
    assert_eq!(
        dates(&found),
        vec![
            date(2025, 8, 15),
            date(2025, 8, 18),
            date(2025, 8, 20),
            date(2025, 8, 21),
            date(2025, 8, 25),
        ]
    );
    let labels: Vec<RotationLabel> = found.iter().map(|m| m.label).collect();
    assert_eq!(
        labels,
        vec![
            RotationLabel::B,
            RotationLabel::C,
            RotationLabel::E,
            RotationLabel::F,
            RotationLabel::A,
        ]
    );
}

#[test]
fn meetings_are_strictly_increasing() {
    let calendar = SchoolCalendar::default();
    let found: Vec<Meeting> = calendar
        .meetings(period(5), date(2025, 8, 14), LunchOption::First)
        .take(50)
        .collect::<Result<_, _>>()
        .unwrap();
    for pair in found.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    assert!(found
        .iter()
        .all(|m| !matches!(m.date.weekday(), Weekday::Saturday | Weekday::Sunday)));
}

#[test]
fn meetings_take_while() {
    let calendar = SchoolCalendar::default();
    let cutoff = date(2025, 8, 22);
    let found: Vec<Meeting> = calendar
        .meetings(period(7), date(2025, 8, 14), LunchOption::Second)
        .take_while(|r| match r {
            Ok(m) => m.date < cutoff,
            Err(_) => false,
        })
        .collect::<Result<_, _>>()
        .unwrap();
    // B, C, E, F; G on the 22nd is cut off.
    assert_eq!(
        dates(&found),
        vec![
            date(2025, 8, 15),
            date(2025, 8, 18),
            date(2025, 8, 20),
            date(2025, 8, 21),
        ]
    );
}

#[test]
fn meetings_in_for_loop() {
    let calendar = SchoolCalendar::default();
    let mut blocks = Vec::new();
    for result in calendar.meetings(period(3), date(2025, 8, 14), LunchOption::Second) {
        let m = result.unwrap();
        blocks.push(m.block_number());
        if blocks.len() == 4 {
            break;
        }
    }
    // B: 5th, D: 2nd, E: 4th, G: 1st
    assert_eq!(blocks, vec![5, 2, 4, 1]);
}

// =============================================================================
// Bounded
// =============================================================================

#[test]
fn between_excludes_start_and_includes_end() {
    let calendar = SchoolCalendar::default();
    let found: Vec<Meeting> = calendar
        .meetings_between(period(2), date(2025, 8, 14), date(2025, 8, 20), LunchOption::Second)
        .collect::<Result<_, _>>()
        .unwrap();
    // Period 2 meets on the epoch itself, but the range is open at the start.
    assert_eq!(
        dates(&found),
        vec![date(2025, 8, 15), date(2025, 8, 19), date(2025, 8, 20)]
    );
}

#[test]
fn between_over_weekend_only_is_empty() {
    let calendar = SchoolCalendar::default();
    let found: Vec<_> = calendar
        .meetings_between(period(2), date(2025, 8, 15), date(2025, 8, 17), LunchOption::Second)
        .collect();
    assert!(found.is_empty());
}

#[test]
fn between_with_end_before_start_is_empty() {
    let calendar = SchoolCalendar::default();
    let found: Vec<_> = calendar
        .meetings_between(period(2), date(2025, 9, 1), date(2025, 8, 1), LunchOption::Second)
        .collect();
    assert!(found.is_empty());
}

#[test]
fn between_counts_a_school_year() {
    let calendar = SchoolCalendar::default();
    let count = calendar
        .meetings_between(period(6), date(2025, 8, 14), date(2026, 6, 12), LunchOption::Second)
        .filter(|r| r.is_ok())
        .count();
    // Five of every seven school days, roughly 216 school days.
    assert!((140..=170).contains(&count), "got {count}");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn meetings_surface_search_failure_once() {
    let calendar = SchoolCalendar::default().with_search_limit(2);
    // From Friday only the weekend is in reach.
    let results: Vec<_> = calendar
        .meetings(period(1), date(2025, 8, 15), LunchOption::Second)
        .collect();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[test]
fn collect_result_stops_at_first_error() {
    let calendar = SchoolCalendar::default().with_search_limit(1);
    let result: Result<Vec<Meeting>, _> = calendar
        .meetings(period(1), date(2025, 8, 14), LunchOption::Second)
        .take(10)
        .collect();
    // First hop (Fri B) succeeds, the next needs Monday which is out of reach.
    assert!(result.is_err());
}
