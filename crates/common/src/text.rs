//! Small string helpers for fixed-width console output.

/// Shorten `s` to at most `width` characters, ending with `...` when cut.
///
/// Widths of three or less simply cut without an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width <= 3 {
        return s.chars().take(width).collect();
    }
    let mut out: String = s.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

/// Render an optional value, falling back to `N/A`.
pub fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}
