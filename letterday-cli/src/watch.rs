//! Clock polling for `letterday watch`.

use std::collections::HashSet;

use jiff::civil::{Date, DateTime};
use letterday::{Meeting, Period};

use crate::config::Settings;

/// Remembers which reminders fired today so a block is announced once even
/// when the clock is polled several times within its reminder minute.
#[derive(Debug, Default)]
pub struct ReminderGuard {
    day: Option<Date>,
    fired: HashSet<Period>,
}

impl ReminderGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meetings due at `now` that have not been announced yet today.
    pub fn poll(&mut self, settings: &Settings, now: DateTime) -> Vec<Meeting> {
        let today = now.date();
        if self.day != Some(today) {
            if self.day.is_some() {
                tracing::debug!(%today, "new day, clearing fired reminders");
            }
            self.day = Some(today);
            self.fired.clear();
        }

        settings
            .calendar
            .reminders_due(now, settings.lunch, settings.reminder_minutes)
            .into_iter()
            .filter(|m| settings.period.map_or(true, |p| p == m.period))
            .filter(|m| self.fired.insert(m.period))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;
    use jiff::civil::date;

    fn settings(period: Option<u8>) -> Settings {
        Preferences {
            period: period.map(|n| Period::new(n).unwrap()),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    #[test]
    fn fires_once_per_minute_window() {
        let mut guard = ReminderGuard::new();
        let s = settings(None);
        // 2025-08-15 is B; block 1 (period 6) ends 09:30.
        let first = guard.poll(&s, date(2025, 8, 15).at(9, 25, 0, 0));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].period.number(), 6);
        assert!(guard.poll(&s, date(2025, 8, 15).at(9, 25, 30, 0)).is_empty());
    }

    #[test]
    fn resets_on_a_new_day() {
        let mut guard = ReminderGuard::new();
        let s = settings(None);
        // Period 1 ends the midday block on B (Fri) and is block 5 on C (Mon).
        assert_eq!(guard.poll(&s, date(2025, 8, 15).at(12, 20, 0, 0)).len(), 1);
        let monday = guard.poll(&s, date(2025, 8, 18).at(15, 10, 0, 0));
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].period.number(), 1);
    }

    #[test]
    fn period_filter() {
        let mut guard = ReminderGuard::new();
        let s = settings(Some(7));
        assert!(guard.poll(&s, date(2025, 8, 15).at(9, 25, 0, 0)).is_empty());
        assert_eq!(guard.poll(&s, date(2025, 8, 15).at(10, 30, 0, 0)).len(), 1);
    }

    #[test]
    fn quiet_between_reminders() {
        let mut guard = ReminderGuard::new();
        let s = settings(None);
        assert!(guard.poll(&s, date(2025, 8, 15).at(9, 0, 0, 0)).is_empty());
        assert!(guard.poll(&s, date(2025, 8, 16).at(9, 25, 0, 0)).is_empty());
    }
}
