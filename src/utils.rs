use std::path::PathBuf;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use url::Url;

/// Splits text pasted into the terminal (what a drag-and-drop produces) into
/// paths.
///
/// Handles whitespace/newline separated lists, single and double quotes,
/// backslash escapes and `file://` URIs. `~` is expanded.
pub fn dropped_paths(text: &str) -> Vec<PathBuf> {
    split_tokens(text)
        .into_iter()
        .filter_map(|token| {
            if token.starts_with("file://") {
                // remote hosts have no local path and are skipped
                Url::parse(&token).ok().and_then(|u| u.to_file_path().ok())
            } else {
                Some(PathBuf::from(shellexpand::tilde(&token).as_ref()))
            }
        })
        .collect()
}

/// The first path of a drop. Later ones are ignored.
pub fn first_dropped_path(text: &str) -> Option<PathBuf> {
    dropped_paths(text).into_iter().next()
}

/// A path typed into the prompt. The whole line is one path, so spaces need
/// no escaping; surrounding quotes are dropped.
pub fn typed_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|q| trimmed.strip_prefix(*q).and_then(|t| t.strip_suffix(*q)))
        .unwrap_or(trimmed);
    if unquoted.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(unquoted).as_ref()))
}

fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_token = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens.retain(|t| !t.is_empty());
    tokens
}

/// "1.2 MB" style sizes for the drop zone.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r)[1];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical)[1]
}
