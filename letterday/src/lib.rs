//! letterday: which class meets when under a seven-day letter rotation.
//!
//! School days (Monday through Friday) cycle through the letters `A`..`G`.
//! Each letter runs five of the seven periods in a fixed order, and each
//! weekday rings a fixed set of five bells, with the midday block shifted by
//! the student's lunch option.
//!
//! # Examples
//!
//! ```
//! use jiff::civil::date;
//! use letterday::{Division, LunchOption, Period, RotationLabel, SchoolCalendar};
//!
//! let calendar = SchoolCalendar::new(Division::Upper);
//! assert_eq!(calendar.letter_day(date(2025, 8, 18)), RotationLabel::C);
//!
//! let period = Period::new(6).unwrap();
//! let next = calendar
//!     .next_occurrence(period, date(2025, 8, 14), LunchOption::Second)
//!     .unwrap();
//! assert_eq!(next.date, date(2025, 8, 15));
//! println!("{next}"); // 2025-08-15 B block 1 period 6 08:30-09:30
//! ```

pub mod calendar;
pub mod display;
pub mod error;
pub mod event;
pub mod order;
pub mod rotation;
pub mod search;
pub mod timetable;

pub use calendar::{Meeting, SchoolCalendar};
pub use error::RotationError;
pub use event::HomeworkEvent;
pub use order::Period;
pub use rotation::RotationLabel;
pub use timetable::{ClassTimeSlot, Division, LunchOption};

use jiff::civil::{Date, DateTime, Weekday};

use crate::order::SLOTS_PER_DAY;
use crate::search::{BoundedMeetings, Meetings};

// --- SchoolCalendar convenience methods ---

impl SchoolCalendar {
    /// Start the rotation on a different `A` day.
    pub fn with_epoch(mut self, epoch: Date) -> Self {
        self.epoch = epoch;
        self
    }

    /// Change how many calendar days `next_occurrence` may look ahead.
    pub fn with_search_limit(mut self, days: u32) -> Self {
        self.search_limit = days;
        self
    }

    /// Rotation label of `date`.
    pub fn letter_day(&self, date: Date) -> RotationLabel {
        rotation::letter_day(date, self.epoch)
    }

    /// Periods meeting on `label`, indexed by slot.
    pub fn periods_for(&self, label: RotationLabel) -> &'static [Period; SLOTS_PER_DAY] {
        order::periods_for(label)
    }

    /// The five blocks of a day with this calendar's bells.
    pub fn slots_for(
        &self,
        weekday: Weekday,
        lunch: LunchOption,
        date: Date,
    ) -> [ClassTimeSlot; SLOTS_PER_DAY] {
        self.division.table().slots_for(weekday, lunch, date)
    }

    /// Next meeting of `period` strictly after `from`.
    pub fn next_occurrence(
        &self,
        period: Period,
        from: Date,
        lunch: LunchOption,
    ) -> Result<Meeting, RotationError> {
        search::next_occurrence(self, period, from, lunch)
    }

    /// The meeting of `period` on `date`, if any.
    pub fn meeting_on(&self, period: Period, date: Date, lunch: LunchOption) -> Option<Meeting> {
        search::meeting_on(self, period, date, lunch)
    }

    /// Lazy iterator over the meetings of `period` after `from`.
    pub fn meetings(&self, period: Period, from: Date, lunch: LunchOption) -> Meetings {
        Meetings::new(*self, period, from, lunch)
    }

    /// Meetings of `period` in `(from, to]`.
    pub fn meetings_between(
        &self,
        period: Period,
        from: Date,
        to: Date,
        lunch: LunchOption,
    ) -> BoundedMeetings {
        BoundedMeetings::new(*self, period, from, to, lunch)
    }

    /// Every block of `date`; empty on weekends.
    pub fn day_schedule(&self, date: Date, lunch: LunchOption) -> Vec<Meeting> {
        search::day_schedule(self, date, lunch)
    }

    /// Meetings whose reminder minute is `at`.
    pub fn reminders_due(
        &self,
        at: DateTime,
        lunch: LunchOption,
        minutes_before: i64,
    ) -> Vec<Meeting> {
        search::reminders_due(self, at, lunch, minutes_before)
    }

    /// Homework appointment for the meeting after `current`.
    pub fn homework_event(
        &self,
        current: &Meeting,
        lunch: LunchOption,
    ) -> Result<HomeworkEvent, RotationError> {
        let next = self.next_occurrence(current.period, current.date, lunch)?;
        Ok(HomeworkEvent::for_next_meeting(current, &next, self.division))
    }
}
