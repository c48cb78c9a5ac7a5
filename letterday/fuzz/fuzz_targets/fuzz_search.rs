#![no_main]
use libfuzzer_sys::fuzz_target;

use letterday::rotation::DEFAULT_EPOCH;
use letterday::{Division, LunchOption, Period, SchoolCalendar};

fuzz_target!(|data: (u16, u8, u8, bool)| {
    let (offset, period, lunch, middle) = data;
    // Roughly ten years either side of the epoch.
    let days = i64::from(offset % 7300) - 3650;
    let Ok(from) = DEFAULT_EPOCH.checked_add(jiff::Span::new().days(days)) else {
        return;
    };
    let Ok(period) = Period::new(period % 7 + 1) else {
        return;
    };
    let lunch = LunchOption::ALL[usize::from(lunch) % LunchOption::ALL.len()];
    let division = if middle { Division::Middle } else { Division::Upper };
    let calendar = SchoolCalendar::new(division);

    let meeting = calendar
        .next_occurrence(period, from, lunch)
        .expect("every period meets within the search window");
    assert!(meeting.date > from);
    assert_eq!(meeting.period, period);
    assert!(meeting.slot.start() < meeting.slot.end());
    assert_eq!(calendar.meeting_on(period, meeting.date, lunch), Some(meeting));
});
