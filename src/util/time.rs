//! Timestamp helpers for message stamping and display.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Shown when a timestamp cannot be parsed.
pub const UNKNOWN_CLOCK: &str = "--:--";

/// Current wall-clock time as ISO-8601, used to stamp optimistic messages.
#[must_use]
pub fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// `hh:mm AM/PM` for an ISO-8601 timestamp, or [`UNKNOWN_CLOCK`].
///
/// In the browser the time is rendered in the local timezone; elsewhere the
/// timestamp's own hour and minute are used.
#[must_use]
pub fn clock_label(timestamp: &str) -> String {
    #[cfg(feature = "hydrate")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(timestamp));
        if timestamp.trim().is_empty() || date.get_time().is_nan() {
            return UNKNOWN_CLOCK.to_owned();
        }
        format_clock(date.get_hours(), date.get_minutes())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        parse_hour_minute(timestamp).map_or_else(|| UNKNOWN_CLOCK.to_owned(), |(h, m)| format_clock(h, m))
    }
}

/// Format a 24-hour time as a zero-padded 12-hour clock.
#[must_use]
pub fn format_clock(hour: u32, minute: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12:02}:{minute:02} {suffix}")
}

/// Hour and minute from `YYYY-MM-DDTHH:MM...`.
#[cfg(any(test, not(feature = "hydrate")))]
fn parse_hour_minute(timestamp: &str) -> Option<(u32, u32)> {
    let (date, time) = timestamp.trim().split_once(['T', ' '])?;
    if date.len() != 10 || date.split('-').count() != 3 {
        return None;
    }
    let hour: u32 = time.get(0..2)?.parse().ok()?;
    if time.get(2..3)? != ":" {
        return None;
    }
    let minute: u32 = time.get(3..5)?.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}
