//! Middle school bells: grade lunch windows and the shortened-lunch weeks.

use jiff::civil::date;
use letterday::timetable::MIDDAY_SLOT;
use letterday::{Division, LunchOption, SchoolCalendar};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calendar = SchoolCalendar::new(Division::Middle);

    for d in [date(2025, 10, 1), date(2025, 10, 8), date(2025, 11, 19)] {
        println!("{d} ({} day, {:?}):", calendar.letter_day(d), d.weekday());
        for lunch in [LunchOption::Grade6, LunchOption::Grade7, LunchOption::Grade8] {
            let slots = calendar.slots_for(d.weekday(), lunch, d);
            println!("  {lunch}: {}", slots[MIDDAY_SLOT]);
        }
    }

    // Reminders five minutes before each block ends
    let day = date(2025, 10, 8);
    println!("\nReminders on {day} for grade 7:");
    for meeting in calendar.day_schedule(day, LunchOption::Grade7) {
        println!("  {} period {}", meeting.reminder_at(5).time(), meeting.period);
    }

    Ok(())
}
