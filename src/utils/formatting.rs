//! Formatting utilities used for terminal and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Display width of `s` in terminal columns (CJK characters count double).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

pub fn pad_center(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    let left = fill / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(fill - left))
}

/// Render an hour-float duration as whole hours plus minutes,
/// omitting the minutes part when it is zero.
///
/// `7.0` → `7 小時`, `7.5` → `7 小時 30 分`
pub fn format_work_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let h = total_minutes.div_euclid(60);
    let m = total_minutes.rem_euclid(60);

    if m == 0 {
        format!("{} 小時", h)
    } else {
        format!("{} 小時 {} 分", h, m)
    }
}
