//! Calendar appointment drafts handed to whatever creates the real event.

use jiff::civil::DateTime;

use crate::calendar::Meeting;
use crate::timetable::Division;

/// Minutes before the appointment starts at which its alarm rings.
pub const EVENT_REMINDER_MINUTES: i64 = 60;

/// A homework appointment placed on the next meeting of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HomeworkEvent {
    pub start: DateTime,
    pub end: DateTime,
    pub subject: String,
    pub body: String,
    pub reminder_minutes_before_start: i64,
}

impl HomeworkEvent {
    /// Draft for homework assigned in `current` and due at `next`.
    ///
    /// Upper school subjects take the all-classes form ("Homework \u{2013} Period
    /// 6") paired with the single-period body text; middle school
    /// subjects name the block the homework was assigned in ("3rd Period HW
    /// due") with an empty body.
    pub fn for_next_meeting(current: &Meeting, next: &Meeting, division: Division) -> Self {
        let (subject, body) = match division {
            Division::Upper => (
                format!("Homework \u{2013} Period {}", next.period),
                "Enter your assignment details here.".to_string(),
            ),
            Division::Middle => (
                format!("{} Period HW due", ordinal(current.block_number())),
                String::new(),
            ),
        };
        Self {
            start: next.start(),
            end: next.end(),
            subject,
            body,
            reminder_minutes_before_start: EVENT_REMINDER_MINUTES,
        }
    }

    /// When the appointment's alarm rings.
    pub fn alarm_at(&self) -> DateTime {
        let secs = self.reminder_minutes_before_start.saturating_mul(60);
        self.start.saturating_sub(jiff::SignedDuration::from_secs(secs))
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ...
pub fn ordinal(n: usize) -> String {
    format!("{n}{}", ordinal_suffix(n))
}

fn ordinal_suffix(n: usize) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
