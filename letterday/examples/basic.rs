//! Basic letterday API walkthrough: letter days, schedules, next meetings.

use jiff::civil::date;
use letterday::{Division, LunchOption, Period, SchoolCalendar};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calendar = SchoolCalendar::new(Division::Upper);
    let today = date(2025, 8, 20);

    // Which letter is today?
    println!("{today} is an {} day", calendar.letter_day(today));

    // The whole day
    println!("\nSchedule with second lunch:");
    for meeting in calendar.day_schedule(today, LunchOption::Second) {
        println!("  block {}: period {} {}", meeting.block_number(), meeting.period, meeting.slot);
    }

    // When does period 4 meet next?
    let period: Period = "4".parse()?;
    let next = calendar.next_occurrence(period, today, LunchOption::Second)?;
    println!("\nNext period {period}: {next}");

    // The next five meetings
    println!("\nNext 5 meetings of period {period}:");
    for meeting in calendar.meetings(period, today, LunchOption::Second).take(5) {
        println!("  {}", meeting?);
    }

    // Homework due at the next meeting
    let event = calendar.homework_event(&next, LunchOption::Second)?;
    println!("\n{} from {} to {} (alarm {})", event.subject, event.start, event.end, event.alarm_at());

    Ok(())
}
