//! Utility functions for the season ladder

/// Round to two decimal places, half away from zero
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole` as a percentage; an empty whole yields 0%
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// `part / whole` as a ratio in `[0, 1]`; an empty whole yields 0
pub fn ratio(part: u32, whole: u32) -> f64 {
    percentage(part, whole) / 100.0
}
