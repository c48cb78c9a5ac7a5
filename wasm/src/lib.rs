use letterday::{Division, LunchOption, Period, SchoolCalendar};
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_date(s: &str) -> Result<jiff::civil::Date, JsError> {
    s.parse().map_err(js_err)
}

/// A school calendar for one division and lunch option, usable from
/// JavaScript.
#[wasm_bindgen]
pub struct Calendar {
    inner: SchoolCalendar,
    lunch: LunchOption,
}

#[wasm_bindgen]
impl Calendar {
    /// `division` is "upper" or "middle". `lunch` may be omitted to use the
    /// division's default window.
    #[wasm_bindgen(constructor)]
    pub fn new(division: &str, lunch: Option<String>) -> Result<Calendar, JsError> {
        let division: Division = division.parse().map_err(js_err)?;
        let lunch = match lunch {
            Some(s) => s.parse().map_err(js_err)?,
            None => division.default_lunch(),
        };
        Ok(Calendar {
            inner: SchoolCalendar::new(division),
            lunch,
        })
    }

    /// Start the rotation on a different A day (ISO date).
    #[wasm_bindgen(js_name = "withEpoch")]
    pub fn with_epoch(self, epoch: &str) -> Result<Calendar, JsError> {
        Ok(Calendar {
            inner: self.inner.with_epoch(parse_date(epoch)?),
            lunch: self.lunch,
        })
    }

    /// Rotation letter ("A".."G") of an ISO date.
    #[wasm_bindgen(js_name = "letterDay")]
    pub fn letter_day(&self, date: &str) -> Result<String, JsError> {
        Ok(self.inner.letter_day(parse_date(date)?).to_string())
    }

    /// Next meeting of `period` strictly after the ISO date `from`.
    #[wasm_bindgen(js_name = "nextOccurrence")]
    pub fn next_occurrence(&self, period: u8, from: &str) -> Result<JsValue, JsError> {
        let period = Period::new(period).map_err(js_err)?;
        let meeting = self
            .inner
            .next_occurrence(period, parse_date(from)?, self.lunch)
            .map_err(js_err)?;
        serde_wasm_bindgen::to_value(&meeting).map_err(js_err)
    }

    /// Every block of an ISO date; an empty array on weekends.
    #[wasm_bindgen(js_name = "daySchedule")]
    pub fn day_schedule(&self, date: &str) -> Result<JsValue, JsError> {
        let meetings = self.inner.day_schedule(parse_date(date)?, self.lunch);
        serde_wasm_bindgen::to_value(&meetings).map_err(js_err)
    }

    /// Homework appointment due at the meeting after the one on `date`.
    #[wasm_bindgen(js_name = "homeworkEvent")]
    pub fn homework_event(&self, period: u8, date: &str) -> Result<JsValue, JsError> {
        let period = Period::new(period).map_err(js_err)?;
        let date = parse_date(date)?;
        let current = self
            .inner
            .meeting_on(period, date, self.lunch)
            .ok_or_else(|| JsError::new(&format!("period {period} does not meet on {date}")))?;
        let event = self
            .inner
            .homework_event(&current, self.lunch)
            .map_err(js_err)?;
        serde_wasm_bindgen::to_value(&event).map_err(js_err)
    }
}

/// Rotation letter of an ISO date with the default epoch.
#[wasm_bindgen(js_name = "letterDay")]
pub fn letter_day(date: &str) -> Result<String, JsError> {
    Ok(SchoolCalendar::default()
        .letter_day(parse_date(date)?)
        .to_string())
}

/// Validate a lunch option string (returns true if recognized).
#[wasm_bindgen(js_name = "isLunchOption")]
pub fn is_lunch_option(input: &str) -> bool {
    input.parse::<LunchOption>().is_ok()
}
