#![no_main]
use libfuzzer_sys::fuzz_target;

use letterday::{Division, LunchOption, Period, RotationLabel};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing never panics, and whatever parses displays back to itself.
        if let Ok(label) = s.parse::<RotationLabel>() {
            assert_eq!(label.to_string().parse::<RotationLabel>().ok(), Some(label));
        }
        if let Ok(lunch) = s.parse::<LunchOption>() {
            assert_eq!(lunch.to_string().parse::<LunchOption>().ok(), Some(lunch));
        }
        if let Ok(division) = s.parse::<Division>() {
            assert_eq!(division.to_string().parse::<Division>().ok(), Some(division));
        }
        if let Ok(period) = s.parse::<Period>() {
            assert!((1..=7).contains(&period.number()));
        }
    }
});
