//! Bell schedules: the five time slots of a school day.
//!
//! Each division has a standard day, optional per-weekday variants (late or
//! early starts), and a midday block whose window depends on the student's
//! lunch option. The midday window can additionally be replaced for a range
//! of dates that recurs every year, e.g. a week with shortened lunches.

use std::str::FromStr;

use jiff::civil::{Date, DateTime, Time, Weekday};
use jiff::SignedDuration;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RotationError;
use crate::order::SLOTS_PER_DAY;

/// Slot index of the block affected by the lunch option.
pub const MIDDAY_SLOT: usize = 2;

/// Default number of minutes before a block's end at which to remind.
pub const DEFAULT_REMINDER_MINUTES: i64 = 5;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Start and end of one class block. `end` is always after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassTimeSlot {
    start: Time,
    end: Time,
}

impl ClassTimeSlot {
    /// Returns `None` unless `end` is strictly after `start`.
    pub fn new(start: Time, end: Time) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn duration(&self) -> SignedDuration {
        self.start.duration_until(self.end)
    }

    /// True if this block ends no later than `other` starts.
    pub fn precedes(&self, other: &ClassTimeSlot) -> bool {
        self.end <= other.start
    }

    /// Start and end of this block on `date`.
    pub fn on(&self, date: Date) -> (DateTime, DateTime) {
        (date.to_datetime(self.start), date.to_datetime(self.end))
    }

    /// Time at which a reminder `minutes_before` the end of the block fires.
    ///
    /// Wraps around midnight, so only `minutes_before` modulo one day
    /// matters; blocks ending within `minutes_before` of midnight are not
    /// supported.
    pub fn reminder_time(&self, minutes_before: i64) -> Time {
        let minutes = minutes_before.rem_euclid(MINUTES_PER_DAY);
        self.end.wrapping_sub(SignedDuration::from_mins(minutes))
    }
}

const fn block(start_h: i8, start_m: i8, end_h: i8, end_m: i8) -> ClassTimeSlot {
    assert!(end_h as i16 * 60 + end_m as i16 > start_h as i16 * 60 + start_m as i16);
    ClassTimeSlot {
        start: jiff::civil::time(start_h, start_m, 0, 0),
        end: jiff::civil::time(end_h, end_m, 0, 0),
    }
}

#[cfg(feature = "serde")]
impl Serialize for ClassTimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("ClassTimeSlot", 2)?;
        s.serialize_field("start", &self.start.strftime("%H:%M").to_string())?;
        s.serialize_field("end", &self.end.strftime("%H:%M").to_string())?;
        s.end()
    }
}

/// Lunch selector. Upper school students pick first or second lunch,
/// middle school lunch windows are assigned by grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunchOption {
    First,
    Second,
    Grade6,
    Grade7,
    Grade8,
}

impl LunchOption {
    pub const ALL: [LunchOption; 5] = [
        Self::First,
        Self::Second,
        Self::Grade6,
        Self::Grade7,
        Self::Grade8,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Grade6 => "grade6",
            Self::Grade7 => "grade7",
            Self::Grade8 => "grade8",
        }
    }
}

impl FromStr for LunchOption {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        match normalized.as_str() {
            "1" | "first" => Ok(Self::First),
            "2" | "second" => Ok(Self::Second),
            "6" | "grade6" => Ok(Self::Grade6),
            "7" | "grade7" => Ok(Self::Grade7),
            "8" | "grade8" => Ok(Self::Grade8),
            _ => Err(RotationError::UnknownLunchOption(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for LunchOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for LunchOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// School division. Both share the rotation and period order but ring
/// different bells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Division {
    #[default]
    Upper,
    Middle,
}

impl Division {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Middle => "middle",
        }
    }

    /// The bell schedule for this division.
    pub fn table(self) -> &'static TimeSlotTable {
        match self {
            Self::Upper => &UPPER_SCHOOL,
            Self::Middle => &MIDDLE_SCHOOL,
        }
    }

    /// Lunch option assumed when none has been chosen.
    pub fn default_lunch(self) -> LunchOption {
        self.table().midday.default_key
    }
}

impl FromStr for Division {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" | "us" => Ok(Self::Upper),
            "middle" | "ms" => Ok(Self::Middle),
            _ => Err(RotationError::UnknownDivision(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Division {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Division {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A month and day, ignoring the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: i8,
    day: i8,
}

impl MonthDay {
    /// Panics unless `day` exists in `month` in some year (Feb 29 allowed).
    pub const fn new(month: i8, day: i8) -> Self {
        assert!(month >= 1 && month <= 12);
        let last = match month {
            2 => 29,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        };
        assert!(day >= 1 && day <= last);
        Self { month, day }
    }

    pub fn of(date: Date) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(self) -> i8 {
        self.month
    }

    pub fn day(self) -> i8 {
        self.day
    }
}

/// Replacement lunch windows for an inclusive month/day range that recurs
/// every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunchWindowOverride {
    start: MonthDay,
    end: MonthDay,
    windows: &'static [(LunchOption, ClassTimeSlot)],
}

impl LunchWindowOverride {
    pub const fn new(
        start: MonthDay,
        end: MonthDay,
        windows: &'static [(LunchOption, ClassTimeSlot)],
    ) -> Self {
        Self {
            start,
            end,
            windows,
        }
    }

    pub fn start(&self) -> MonthDay {
        self.start
    }

    pub fn end(&self) -> MonthDay {
        self.end
    }

    /// True if `date` falls in the range, both ends included. A range whose
    /// start is after its end runs across New Year.
    pub fn contains(&self, date: Date) -> bool {
        let md = MonthDay::of(date);
        if self.start <= self.end {
            self.start <= md && md <= self.end
        } else {
            md >= self.start || md <= self.end
        }
    }

    pub fn window_for(&self, lunch: LunchOption) -> Option<ClassTimeSlot> {
        lookup(self.windows, lunch)
    }
}

fn lookup(windows: &[(LunchOption, ClassTimeSlot)], lunch: LunchOption) -> Option<ClassTimeSlot> {
    windows
        .iter()
        .find(|(key, _)| *key == lunch)
        .map(|(_, slot)| *slot)
}

/// Midday block windows keyed by lunch option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiddayTable {
    /// Regular windows. The first entry belongs to `default_key`.
    regular: &'static [(LunchOption, ClassTimeSlot)],
    /// Checked in order, first match wins.
    overrides: &'static [LunchWindowOverride],
    default_key: LunchOption,
}

impl MiddayTable {
    pub fn default_key(&self) -> LunchOption {
        self.default_key
    }

    pub fn overrides(&self) -> &'static [LunchWindowOverride] {
        self.overrides
    }

    /// True if the regular table has a window for `lunch`.
    pub fn recognizes(&self, lunch: LunchOption) -> bool {
        lookup(self.regular, lunch).is_some()
    }

    /// Midday window for `lunch` on `date`.
    ///
    /// An unrecognized option is replaced by the default key before any
    /// lookup, so it gets the default's override window too.
    pub fn resolve(&self, lunch: LunchOption, date: Date) -> ClassTimeSlot {
        let key = if self.recognizes(lunch) {
            lunch
        } else {
            tracing::trace!(
                lunch = lunch.as_str(),
                fallback = self.default_key.as_str(),
                "unrecognized lunch option"
            );
            self.default_key
        };

        for (index, ov) in self.overrides.iter().enumerate() {
            if !ov.contains(date) {
                continue;
            }
            if let Some(slot) = ov.window_for(key) {
                tracing::debug!(%date, override_index = index, lunch = key.as_str(), "lunch override applies");
                return slot;
            }
        }

        lookup(self.regular, key).unwrap_or(self.regular[0].1)
    }
}

/// The fixed, non-midday blocks of one kind of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayVariant {
    name: &'static str,
    morning: [ClassTimeSlot; 2],
    afternoon: [ClassTimeSlot; 2],
}

impl DayVariant {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A division's complete bell schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlotTable {
    standard: DayVariant,
    special: &'static [(Weekday, DayVariant)],
    midday: MiddayTable,
}

impl TimeSlotTable {
    /// Day variant used on `weekday`. Weekends use the standard variant.
    pub fn variant_for(&self, weekday: Weekday) -> &DayVariant {
        self.special
            .iter()
            .find(|(wd, _)| *wd == weekday)
            .map(|(_, variant)| variant)
            .unwrap_or(&self.standard)
    }

    pub fn midday(&self) -> &MiddayTable {
        &self.midday
    }

    /// The five blocks of a day, in order.
    pub fn slots_for(
        &self,
        weekday: Weekday,
        lunch: LunchOption,
        date: Date,
    ) -> [ClassTimeSlot; SLOTS_PER_DAY] {
        let variant = self.variant_for(weekday);
        let midday = self.midday.resolve(lunch, date);
        [
            variant.morning[0],
            variant.morning[1],
            midday,
            variant.afternoon[0],
            variant.afternoon[1],
        ]
    }
}

// --- Upper school ---

const UPPER_AFTERNOON: [ClassTimeSlot; 2] = [block(13, 10, 14, 10), block(14, 15, 15, 15)];

pub static UPPER_SCHOOL: TimeSlotTable = TimeSlotTable {
    standard: DayVariant {
        name: "standard",
        morning: [block(8, 30, 9, 30), block(9, 35, 10, 35)],
        afternoon: UPPER_AFTERNOON,
    },
    special: &[(
        Weekday::Wednesday,
        DayVariant {
            name: "late start",
            morning: [block(9, 15, 10, 15), block(10, 20, 11, 20)],
            afternoon: UPPER_AFTERNOON,
        },
    )],
    midday: MiddayTable {
        regular: &[
            (LunchOption::Second, block(11, 25, 12, 25)),
            (LunchOption::First, block(12, 5, 13, 5)),
        ],
        overrides: &[],
        default_key: LunchOption::Second,
    },
};

// --- Middle school ---

const MIDDLE_AFTERNOON: [ClassTimeSlot; 2] = [block(13, 5, 14, 0), block(14, 5, 15, 0)];

pub static MIDDLE_SCHOOL: TimeSlotTable = TimeSlotTable {
    standard: DayVariant {
        name: "standard",
        morning: [block(8, 45, 9, 40), block(9, 45, 10, 40)],
        afternoon: MIDDLE_AFTERNOON,
    },
    special: &[
        (
            Weekday::Wednesday,
            DayVariant {
                name: "late start",
                morning: [block(8, 55, 9, 50), block(9, 55, 10, 50)],
                afternoon: MIDDLE_AFTERNOON,
            },
        ),
        (
            Weekday::Thursday,
            DayVariant {
                name: "early start",
                morning: [block(8, 30, 9, 25), block(9, 30, 10, 25)],
                afternoon: MIDDLE_AFTERNOON,
            },
        ),
    ],
    midday: MiddayTable {
        regular: &[
            (LunchOption::Grade8, block(12, 5, 12, 25)),
            (LunchOption::Grade6, block(12, 25, 12, 40)),
            (LunchOption::Grade7, block(12, 40, 13, 0)),
        ],
        overrides: &[
            LunchWindowOverride {
                start: MonthDay::new(10, 6),
                end: MonthDay::new(10, 10),
                windows: &[
                    (LunchOption::Grade8, block(11, 55, 12, 15)),
                    (LunchOption::Grade6, block(12, 15, 12, 30)),
                    (LunchOption::Grade7, block(12, 30, 12, 45)),
                ],
            },
            LunchWindowOverride {
                start: MonthDay::new(11, 17),
                end: MonthDay::new(11, 21),
                windows: &[
                    (LunchOption::Grade8, block(11, 45, 12, 5)),
                    (LunchOption::Grade6, block(12, 5, 12, 20)),
                    (LunchOption::Grade7, block(12, 20, 12, 40)),
                ],
            },
        ],
        default_key: LunchOption::Grade8,
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::{date, time};

    fn slot(sh: i8, sm: i8, eh: i8, em: i8) -> ClassTimeSlot {
        ClassTimeSlot::new(time(sh, sm, 0, 0), time(eh, em, 0, 0)).unwrap()
    }

    #[test]
    fn upper_standard_day() {
        let d = date(2025, 8, 18); // Monday
        let slots = UPPER_SCHOOL.slots_for(d.weekday(), LunchOption::Second, d);
        assert_eq!(slots[0], slot(8, 30, 9, 30));
        assert_eq!(slots[1], slot(9, 35, 10, 35));
        assert_eq!(slots[2], slot(11, 25, 12, 25));
        assert_eq!(slots[3], slot(13, 10, 14, 10));
        assert_eq!(slots[4], slot(14, 15, 15, 15));
    }

    #[test]
    fn upper_wednesday_shifts_morning_only() {
        let d = date(2025, 8, 20);
        let slots = UPPER_SCHOOL.slots_for(Weekday::Wednesday, LunchOption::First, d);
        assert_eq!(slots[0], slot(9, 15, 10, 15));
        assert_eq!(slots[1], slot(10, 20, 11, 20));
        assert_eq!(slots[2], slot(12, 5, 13, 5));
        assert_eq!(slots[3], slot(13, 10, 14, 10));
    }

    #[test]
    fn upper_unknown_key_falls_back_to_second_lunch() {
        let d = date(2025, 8, 18);
        let slots = UPPER_SCHOOL.slots_for(Weekday::Monday, LunchOption::Grade7, d);
        assert_eq!(slots[MIDDAY_SLOT], slot(11, 25, 12, 25));
    }

    #[test]
    fn middle_thursday_starts_early() {
        let d = date(2025, 8, 21);
        let slots = MIDDLE_SCHOOL.slots_for(Weekday::Thursday, LunchOption::Grade6, d);
        assert_eq!(slots[0], slot(8, 30, 9, 25));
        assert_eq!(slots[2], slot(12, 25, 12, 40));
        assert_eq!(MIDDLE_SCHOOL.variant_for(Weekday::Thursday).name(), "early start");
    }

    #[test]
    fn middle_override_inside_range() {
        let d = date(2025, 10, 8);
        let slots = MIDDLE_SCHOOL.slots_for(d.weekday(), LunchOption::Grade8, d);
        assert_eq!(slots[MIDDAY_SLOT], slot(11, 55, 12, 15));
    }

    #[test]
    fn middle_override_end_day_is_inclusive() {
        let d = date(2025, 10, 10);
        let slots = MIDDLE_SCHOOL.slots_for(d.weekday(), LunchOption::Grade8, d);
        assert_eq!(slots[MIDDAY_SLOT], slot(11, 55, 12, 15));
    }

    #[test]
    fn middle_override_day_after_range_is_regular() {
        let d = date(2025, 10, 11);
        let slots = MIDDLE_SCHOOL.slots_for(d.weekday(), LunchOption::Grade8, d);
        assert_eq!(slots[MIDDAY_SLOT], slot(12, 5, 12, 25));
    }

    #[test]
    fn override_ignores_year() {
        let d = date(2031, 11, 19);
        let slots = MIDDLE_SCHOOL.slots_for(d.weekday(), LunchOption::Grade7, d);
        assert_eq!(slots[MIDDAY_SLOT], slot(12, 20, 12, 40));
    }

    #[test]
    fn unknown_key_in_override_week_uses_default_override_window() {
        let d = date(2025, 11, 18);
        let slots = MIDDLE_SCHOOL.slots_for(d.weekday(), LunchOption::First, d);
        assert_eq!(slots[MIDDAY_SLOT], slot(11, 45, 12, 5));
    }

    #[test]
    fn wrapping_override_spans_new_year() {
        static WINDOWS: [(LunchOption, ClassTimeSlot); 1] =
            [(LunchOption::Grade8, block(11, 0, 11, 30))];
        let ov = LunchWindowOverride::new(MonthDay::new(12, 28), MonthDay::new(1, 3), &WINDOWS);
        assert!(ov.contains(date(2025, 12, 30)));
        assert!(ov.contains(date(2026, 1, 3)));
        assert!(!ov.contains(date(2026, 1, 4)));
        assert!(!ov.contains(date(2025, 12, 27)));
    }

    #[test]
    fn default_key_owns_first_regular_entry() {
        for division in [Division::Upper, Division::Middle] {
            let midday = division.table().midday();
            assert_eq!(midday.regular[0].0, midday.default_key(), "{division:?}");
        }
    }

    #[test]
    fn slots_strictly_increase_for_every_combination() {
        let dates = [
            date(2025, 8, 18),
            date(2025, 8, 20),
            date(2025, 8, 21),
            date(2025, 10, 8),
            date(2025, 11, 19),
        ];
        for division in [Division::Upper, Division::Middle] {
            for d in dates {
                for lunch in LunchOption::ALL {
                    let slots = division.table().slots_for(d.weekday(), lunch, d);
                    for pair in slots.windows(2) {
                        assert!(pair[0].precedes(&pair[1]), "{division:?} {d} {lunch:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn reminder_five_minutes_before_end() {
        let s = slot(8, 30, 9, 30);
        assert_eq!(s.reminder_time(DEFAULT_REMINDER_MINUTES), time(9, 25, 0, 0));
        assert_eq!(s.reminder_time(60), time(8, 30, 0, 0));
    }

    #[test]
    fn reminder_offset_wraps_by_whole_days() {
        let s = slot(8, 30, 9, 30);
        assert_eq!(s.reminder_time(MINUTES_PER_DAY + 5), time(9, 25, 0, 0));
        assert_eq!(s.reminder_time(-5), time(9, 35, 0, 0));
        assert_eq!(
            s.reminder_time(i64::MAX),
            s.reminder_time(i64::MAX.rem_euclid(MINUTES_PER_DAY))
        );
        let _ = s.reminder_time(i64::MIN);
    }

    #[test]
    fn month_day_accepts_leap_day() {
        assert_eq!(MonthDay::new(2, 29).day(), 29);
        assert_eq!(MonthDay::new(12, 31).month(), 12);
    }

    #[test]
    #[should_panic]
    fn month_day_rejects_february_30() {
        MonthDay::new(2, 30);
    }

    #[test]
    #[should_panic]
    fn month_day_rejects_april_31() {
        MonthDay::new(4, 31);
    }

    #[test]
    fn slot_requires_end_after_start() {
        assert!(ClassTimeSlot::new(time(9, 0, 0, 0), time(9, 0, 0, 0)).is_none());
        assert!(ClassTimeSlot::new(time(10, 0, 0, 0), time(9, 0, 0, 0)).is_none());
    }

    #[test]
    fn parse_lunch_options() {
        assert_eq!("1".parse::<LunchOption>().unwrap(), LunchOption::First);
        assert_eq!("Second".parse::<LunchOption>().unwrap(), LunchOption::Second);
        assert_eq!("grade 8".parse::<LunchOption>().unwrap(), LunchOption::Grade8);
        assert_eq!("7".parse::<LunchOption>().unwrap(), LunchOption::Grade7);
        assert!("third".parse::<LunchOption>().is_err());
    }

    #[test]
    fn parse_division() {
        assert_eq!("Middle".parse::<Division>().unwrap(), Division::Middle);
        assert_eq!(Division::Middle.default_lunch(), LunchOption::Grade8);
        assert_eq!(Division::Upper.default_lunch(), LunchOption::Second);
        assert!("lower".parse::<Division>().is_err());
    }
}
