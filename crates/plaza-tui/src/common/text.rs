//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` terminal columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let next_width = width + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        width = next_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Keeps the tail of `text` visible, for input lines longer than their box.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut tail = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let next_width = width + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        width = next_width;
        tail.push(ch);
    }
    let mut truncated = String::from("…");
    truncated.extend(tail.into_iter().rev());
    truncated
}

/// One bullet per character, for password fields.
pub fn mask(text: &str) -> String {
    "•".repeat(text.chars().count())
}

/// "1 like" / "3 likes".
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
