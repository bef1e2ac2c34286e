//! Terminal presentation: colors, cleaned text and the similarity report.

use imgsteg_core::similarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Success,
    Warning,
    Failure,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Success => "\x1b[32m",
            Style::Warning => "\x1b[33m",
            Style::Failure => "\x1b[31m",
        }
    }
}

/// wraps `text` in color codes, plain text when not printing to a terminal
pub fn paint(text: &str, style: Style, interactive: bool) -> String {
    if interactive {
        format!("{}{text}\x1b[0m", style.ansi())
    } else {
        text.to_string()
    }
}

/// drops control and other non printable characters, keeps line breaks, trims
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\n' || *c == '\r' || !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn similarity_style(percent: f32) -> Style {
    if percent > 99.99 {
        Style::Success
    } else if percent > 75.0 {
        Style::Warning
    } else {
        Style::Failure
    }
}

/// compares the cleaned text forms of `expected` and `actual`
pub fn similarity_report(expected: &[u8], actual: &[u8], interactive: bool) -> String {
    let expected = clean(&String::from_utf8_lossy(expected));
    let actual = clean(&String::from_utf8_lossy(actual));
    let percent = similarity(expected.as_bytes(), actual.as_bytes());

    format!(
        "Similarity: {}",
        paint(&format!("{percent:.2}%"), similarity_style(percent), interactive)
    )
}
