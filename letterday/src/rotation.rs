//! The seven-day letter rotation.
//!
//! Only Monday through Friday advance the rotation; weekends keep the label
//! of the preceding Friday. The label of any date is recomputed from the
//! epoch every time, nothing is cached.

use std::str::FromStr;

use jiff::civil::{Date, Weekday};

use crate::error::RotationError;

/// First day of the 2025-26 rotation, a Thursday and an A day.
pub const DEFAULT_EPOCH: Date = jiff::civil::date(2025, 8, 14);

/// One letter of the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl RotationLabel {
    /// Number of labels in one full rotation.
    pub const COUNT: usize = 7;

    /// All labels in rotation order.
    pub const ALL: [RotationLabel; Self::COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// Position in the rotation, `A` = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label at `index`, reduced modulo the rotation length.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// The label `steps` school days later.
    pub fn advance(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps % Self::COUNT)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }
}

impl FromStr for RotationLabel {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            "G" => Ok(Self::G),
            _ => Err(RotationError::UnknownLabel(s.to_string())),
        }
    }
}

/// Monday through Friday.
pub fn is_school_day(date: Date) -> bool {
    !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Count school days in `(epoch, date]`.
///
/// Walks one day at a time so weekends never enter the count.
pub fn school_days_between(epoch: Date, date: Date) -> u64 {
    let mut count = 0;
    let mut day = epoch;
    while day < date {
        day = match day.tomorrow() {
            Ok(d) => d,
            Err(_) => break,
        };
        if is_school_day(day) {
            count += 1;
        }
    }
    count
}

/// Rotation label for `date`, counting from `epoch` (an `A` day).
///
/// Dates on or before the epoch are `A`.
pub fn letter_day(date: Date, epoch: Date) -> RotationLabel {
    if date <= epoch {
        return RotationLabel::A;
    }
    let n = school_days_between(epoch, date);
    RotationLabel::from_index((n % RotationLabel::COUNT as u64) as usize)
}
