use std::fmt;

use crate::calendar::Meeting;
use crate::order::Period;
use crate::rotation::RotationLabel;
use crate::timetable::{ClassTimeSlot, Division, LunchOption, MonthDay};

impl fmt::Display for RotationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl fmt::Display for ClassTimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start().hour(),
            self.start().minute(),
            self.end().hour(),
            self.end().minute()
        )
    }
}

impl fmt::Display for LunchOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month(), self.day())
    }
}

/// `2025-08-15 B block 1 period 6 08:30-09:30`
impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} block {} period {} {}",
            self.date,
            self.label,
            self.block_number(),
            self.period,
            self.slot
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SchoolCalendar;
    use crate::search::next_occurrence;
    use jiff::civil::{date, time};

    #[test]
    fn slot_display() {
        let slot = ClassTimeSlot::new(time(8, 5, 0, 0), time(9, 0, 0, 0)).unwrap();
        assert_eq!(slot.to_string(), "08:05-09:00");
    }

    #[test]
    fn meeting_display() {
        let calendar = SchoolCalendar::default();
        let m = next_occurrence(
            &calendar,
            Period::new(6).unwrap(),
            date(2025, 8, 14),
            LunchOption::Second,
        )
        .unwrap();
        assert_eq!(m.to_string(), "2025-08-15 B block 1 period 6 08:30-09:30");
    }

    #[test]
    fn month_day_display() {
        assert_eq!(MonthDay::new(10, 6).to_string(), "10-06");
    }

    #[test]
    fn enum_display_matches_parse() {
        for lunch in LunchOption::ALL {
            assert_eq!(lunch.to_string().parse::<LunchOption>().unwrap(), lunch);
        }
        for label in RotationLabel::ALL {
            assert_eq!(label.to_string().parse::<RotationLabel>().unwrap(), label);
        }
        for division in [Division::Upper, Division::Middle] {
            assert_eq!(division.to_string().parse::<Division>().unwrap(), division);
        }
    }
}
