use jiff::civil::{Date, DateTime};

use crate::order::Period;
use crate::rotation::{RotationLabel, DEFAULT_EPOCH};
use crate::timetable::{ClassTimeSlot, Division};

/// Calendar days the forward search examines before giving up.
pub const DEFAULT_SEARCH_LIMIT: u32 = 30;

/// Everything needed to resolve a date: which day starts the rotation,
/// which division's bells ring, and how far a search may look ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolCalendar {
    pub epoch: Date,
    pub division: Division,
    pub search_limit: u32,
}

impl SchoolCalendar {
    /// Calendar for `division` starting at the default epoch.
    pub fn new(division: Division) -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
            division,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl Default for SchoolCalendar {
    fn default() -> Self {
        Self::new(Division::default())
    }
}

/// One resolved class meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Meeting {
    pub date: Date,
    pub label: RotationLabel,
    pub period: Period,
    /// Zero-based position within the day.
    pub slot_index: usize,
    pub slot: ClassTimeSlot,
}

impl Meeting {
    pub fn start(&self) -> DateTime {
        self.date.to_datetime(self.slot.start())
    }

    pub fn end(&self) -> DateTime {
        self.date.to_datetime(self.slot.end())
    }

    /// One-based block number, as printed on the bell schedule.
    pub fn block_number(&self) -> usize {
        self.slot_index + 1
    }

    /// When a reminder `minutes_before` the end of this meeting fires.
    pub fn reminder_at(&self, minutes_before: i64) -> DateTime {
        self.date.to_datetime(self.slot.reminder_time(minutes_before))
    }
}
