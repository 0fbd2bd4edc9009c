use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Utility functions for terminal output

// ===== STRING UTILITIES =====

/// Truncates a string to at most `max_width` terminal columns, adding "..."
/// if truncated. Wide characters (CJK, emoji) count as two columns.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&".".repeat(max_width.min(3)));
    out
}

/// Pads with spaces on the right to `width` columns (never truncates)
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

/// Renders a whole-dollar amount as shown in the app, e.g. `$1758`
pub fn format_dollars(amount: i64) -> String {
    if amount < 0 {
        format!("-${}", -amount)
    } else {
        format!("${}", amount)
    }
}

/// Renders a rating as five stars, rounding to the nearest whole star
pub fn render_stars(rating: f64) -> String {
    let full = rating.clamp(0.0, 5.0).round() as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}
