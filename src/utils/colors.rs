/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

/// Background used for break cells.
pub const BREAK_BG: &str = "\x1b[48;5;250m\x1b[30m";

/// Parse a `#RRGGBB` display color.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Truecolor background escape for a `#RRGGBB` color, with white text.
/// Unparseable colors fall back to plain output.
pub fn background(color: &str) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => format!("\x1b[48;2;{r};{g};{b}m\x1b[97m"),
        None => RESET.to_string(),
    }
}

/// Wrap `text` in the background of `color`.
pub fn paint_bg(color: &str, text: &str) -> String {
    format!("{}{}{}", background(color), text, RESET)
}
