use jiff::civil::{Date, DateTime};

use crate::calendar::{Meeting, SchoolCalendar};
use crate::error::RotationError;
use crate::order::{periods_for, slot_of, Period};
use crate::rotation::{is_school_day, letter_day, RotationLabel};
use crate::timetable::LunchOption;

fn add_days(date: Date, days: i64) -> Result<Date, RotationError> {
    date.checked_add(jiff::Span::new().days(days))
        .map_err(|e| RotationError::out_of_range(format!("{date} + {days} days: {e}")))
}

/// The meeting of `period` on `date`, if it meets that day.
pub fn meeting_on(
    calendar: &SchoolCalendar,
    period: Period,
    date: Date,
    lunch: LunchOption,
) -> Option<Meeting> {
    if !is_school_day(date) {
        return None;
    }
    let label = letter_day(date, calendar.epoch);
    let slot_index = slot_of(label, period)?;
    let slots = calendar.division.table().slots_for(date.weekday(), lunch, date);
    slots.get(slot_index).map(|slot| Meeting {
        date,
        label,
        period,
        slot_index,
        slot: *slot,
    })
}

/// Next meeting of `period` strictly after `from`.
///
/// Looks at most `calendar.search_limit` calendar days ahead. Every period
/// meets within seven school days, so running out of days means the tables
/// are broken.
///
/// Every day up to the epoch is an `A` day. A period absent from `A` cannot
/// meet before the epoch, so the window for it starts at the epoch.
pub fn next_occurrence(
    calendar: &SchoolCalendar,
    period: Period,
    from: Date,
    lunch: LunchOption,
) -> Result<Meeting, RotationError> {
    let base = if from < calendar.epoch && slot_of(RotationLabel::A, period).is_none() {
        tracing::trace!(%from, epoch = %calendar.epoch, %period, "period never meets before the epoch");
        calendar.epoch
    } else {
        from
    };
    for offset in 1..=i64::from(calendar.search_limit) {
        let candidate = add_days(base, offset)?;
        if !is_school_day(candidate) {
            tracing::trace!(%candidate, "skipping weekend");
            continue;
        }
        if let Some(meeting) = meeting_on(calendar, period, candidate, lunch) {
            tracing::debug!(
                %period,
                %from,
                date = %meeting.date,
                label = meeting.label.as_str(),
                slot = meeting.slot_index,
                "found next meeting"
            );
            return Ok(meeting);
        }
        tracing::trace!(%candidate, %period, "period does not meet");
    }
    Err(RotationError::NoOccurrenceFound {
        period,
        from,
        limit: calendar.search_limit,
    })
}

/// All five blocks of `date` in order. Empty on weekends.
pub fn day_schedule(calendar: &SchoolCalendar, date: Date, lunch: LunchOption) -> Vec<Meeting> {
    if !is_school_day(date) {
        return Vec::new();
    }
    let label = letter_day(date, calendar.epoch);
    let slots = calendar.division.table().slots_for(date.weekday(), lunch, date);
    periods_for(label)
        .iter()
        .zip(slots)
        .enumerate()
        .map(|(slot_index, (period, slot))| Meeting {
            date,
            label,
            period: *period,
            slot_index,
            slot,
        })
        .collect()
}

/// Meetings whose reminder, `minutes_before` their end, falls on the same
/// minute as `at`.
pub fn reminders_due(
    calendar: &SchoolCalendar,
    at: DateTime,
    lunch: LunchOption,
    minutes_before: i64,
) -> Vec<Meeting> {
    day_schedule(calendar, at.date(), lunch)
        .into_iter()
        .filter(|m| {
            let reminder = m.slot.reminder_time(minutes_before);
            reminder.hour() == at.hour() && reminder.minute() == at.minute()
        })
        .collect()
}

/// Lazy iterator over successive meetings of one period.
pub struct Meetings {
    calendar: SchoolCalendar,
    period: Period,
    lunch: LunchOption,
    cursor: Date,
    done: bool,
}

impl Meetings {
    /// Meetings strictly after `from`.
    pub fn new(calendar: SchoolCalendar, period: Period, from: Date, lunch: LunchOption) -> Self {
        Self {
            calendar,
            period,
            lunch,
            cursor: from,
            done: false,
        }
    }
}

impl Iterator for Meetings {
    type Item = Result<Meeting, RotationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match next_occurrence(&self.calendar, self.period, self.cursor, self.lunch) {
            Ok(meeting) => {
                self.cursor = meeting.date;
                Some(Ok(meeting))
            }
            Err(e) => {
                // Searching again from the same cursor would fail the same way.
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Meetings in the range `(from, to]`.
pub struct BoundedMeetings {
    inner: Meetings,
    to: Date,
}

impl BoundedMeetings {
    pub fn new(
        calendar: SchoolCalendar,
        period: Period,
        from: Date,
        to: Date,
        lunch: LunchOption,
    ) -> Self {
        Self {
            inner: Meetings::new(calendar, period, from, lunch),
            to,
        }
    }
}

impl Iterator for BoundedMeetings {
    type Item = Result<Meeting, RotationError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(Ok(m)) if m.date <= self.to => Some(Ok(m)),
            Some(Ok(_)) => None,
            Some(Err(e)) => Some(Err(e)),
            None => None,
        }
    }
}
