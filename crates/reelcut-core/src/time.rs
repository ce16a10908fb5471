//! Time text rendering and parsing.
//!
//! Timeline positions are plain seconds. These helpers render them as
//! `H:MM:SS` (with millisecond precision when the value is fractional) and
//! parse user-typed values back, accepting partial forms like `MM:SS` or a
//! bare seconds count.

/// Render a time in seconds as `M:SS`, or `H:MM:SS` when there is an hour
/// component or `long` is requested.
///
/// Fractional seconds are kept to millisecond precision with trailing zeros
/// trimmed, so `65.25` renders as `1:05.25`.
pub fn format_hms(time: f64, long: bool) -> String {
    let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
    let seconds = (time * 1000.0).floor() / 1000.0 % 60.0;
    let minutes = (time / 60.0).floor() as u64 % 60;
    let hours = (time / 3600.0).floor() as u64;
    if hours == 0 && !long {
        format!("{}:{}", minutes, pad_seconds(seconds))
    } else {
        format!("{}:{:02}:{}", hours, minutes, pad_seconds(seconds))
    }
}

fn pad_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        return format!("{:02}", seconds as u64);
    }
    let mut text = format!("{:.3}", seconds);
    while text.ends_with('0') {
        text.pop();
    }
    if seconds < 10.0 {
        text.insert(0, '0');
    }
    text
}

/// Parse a `[[H:]MM:]SS` value into seconds.
///
/// Components are read back-to-front, so `90` is ninety seconds and `1:30`
/// is one minute thirty. Malformed components degrade to zero rather than
/// failing the whole value.
pub fn parse_hms(value: &str) -> f64 {
    let mut components = value.split(':').rev().map(|component| {
        let parsed: f64 = component.trim().parse().unwrap_or(0.0);
        if parsed.is_finite() {
            parsed
        } else {
            0.0
        }
    });
    let seconds = components.next().unwrap_or(0.0);
    let minutes = components.next().unwrap_or(0.0);
    let hours = components.next().unwrap_or(0.0);
    hours * 3600.0 + minutes * 60.0 + seconds
}
