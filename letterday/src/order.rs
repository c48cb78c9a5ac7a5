//! Which five of the seven periods meet on each letter day, and in what order.

use std::str::FromStr;

use crate::error::RotationError;
use crate::rotation::RotationLabel;

/// Number of meeting blocks in a school day.
pub const SLOTS_PER_DAY: usize = 5;

/// A recurring course block, 1 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Period(u8);

impl Period {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(n: u8) -> Result<Self, RotationError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(RotationError::InvalidPeriod(n.to_string()))
        }
    }

    /// All seven periods in ascending order.
    pub fn all() -> impl Iterator<Item = Period> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

const fn p(n: u8) -> Period {
    assert!(n >= Period::MIN && n <= Period::MAX);
    Period(n)
}

impl TryFrom<u8> for Period {
    type Error = RotationError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> u8 {
        period.0
    }
}

impl FromStr for Period {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| RotationError::InvalidPeriod(trimmed.to_string()))
            .and_then(Self::new)
    }
}

static ORDER_A: [Period; SLOTS_PER_DAY] = [p(1), p(2), p(3), p(4), p(5)];
static ORDER_B: [Period; SLOTS_PER_DAY] = [p(6), p(7), p(1), p(2), p(3)];
static ORDER_C: [Period; SLOTS_PER_DAY] = [p(4), p(5), p(6), p(7), p(1)];
static ORDER_D: [Period; SLOTS_PER_DAY] = [p(2), p(3), p(4), p(5), p(6)];
static ORDER_E: [Period; SLOTS_PER_DAY] = [p(7), p(1), p(2), p(3), p(4)];
static ORDER_F: [Period; SLOTS_PER_DAY] = [p(5), p(6), p(7), p(1), p(2)];
static ORDER_G: [Period; SLOTS_PER_DAY] = [p(3), p(4), p(5), p(6), p(7)];

/// Periods meeting on `label`, indexed by slot.
pub fn periods_for(label: RotationLabel) -> &'static [Period; SLOTS_PER_DAY] {
    match label {
        RotationLabel::A => &ORDER_A,
        RotationLabel::B => &ORDER_B,
        RotationLabel::C => &ORDER_C,
        RotationLabel::D => &ORDER_D,
        RotationLabel::E => &ORDER_E,
        RotationLabel::F => &ORDER_F,
        RotationLabel::G => &ORDER_G,
    }
}

/// Slot occupied by `period` on `label`, or `None` if it does not meet.
pub fn slot_of(label: RotationLabel, period: Period) -> Option<usize> {
    periods_for(label).iter().position(|p| *p == period)
}
