//! Time model: hour-floats (integer part = hour, fraction = minutes / 60)
//! and their "HH:MM" clock representation.

/// Parse "HH:MM" into an hour-float.
///
/// Returns `None` on empty input or when either part is not a number.
/// Business-hours bounds are *not* checked here.
pub fn parse_clock(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (hour, minute) = text.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;

    Some(f64::from(hour) + f64::from(minute) / 60.0)
}

/// Format an hour-float as "HH:MM".
///
/// Minutes are rounded to the nearest minute, so arbitrary floats may land
/// one minute off; half-hour values always round-trip through `parse_clock`.
pub fn format_clock(value: f64) -> String {
    let mut hours = value.floor() as i64;
    let mut minutes = ((value - value.floor()) * 60.0).round() as i64;
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }
    format!("{:02}:{:02}", hours, minutes)
}

/// Clock value used to prefill an edit form: absent times become "".
pub fn to_time_input_value(value: Option<f64>) -> String {
    value.map(format_clock).unwrap_or_default()
}

/// Empty input is trivially aligned; otherwise the minute part must be 0 or 30.
pub fn is_half_hour_aligned(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 {
        return false;
    }

    matches!(parts[1].trim().parse::<u32>(), Ok(0) | Ok(30))
}
