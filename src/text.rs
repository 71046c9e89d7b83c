//! Text measurement and clipping for canvas labels.
//!
//! Neither backend offers cheap glyph metrics from inside a pure render
//! function, so widths are estimated from the character count.

/// Heuristic: estimate pixel width of `text` at `font_px`.
pub fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    (text.chars().count() as f64 * font_px * 0.60).ceil()
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: f64, max_px: f64) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        let candidate = format!("{out}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            out.pop();
            break;
        }
    }
    if out.is_empty() {
        return out;
    }
    out.push('…');
    out
}

/// `MM-DD` tick label from an ISO-like `YYYY-MM-DD...` date string.
///
/// Strings shorter than the year prefix produce an empty label.
pub fn month_day_label(date: &str) -> String {
    date.chars().skip(5).take(5).collect()
}
