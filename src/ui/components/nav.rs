use crate::ui::Theme;
use ratatui::text::{Line, Span};

/// Key hint bar: `[key]Label` pairs, styled alike on every screen.
pub fn nav_bar<'a>(items: &[(&'a str, &'a str)]) -> Line<'a> {
    let spans: Vec<Span<'a>> = items
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!("[{}]", key), Theme::nav_key()),
                Span::styled(format!("{} ", label), Theme::nav_label()),
            ]
        })
        .collect();

    Line::from(spans)
}

/// Screen switch hints shared by every screen.
pub const SCREEN_KEYS: &[(&str, &str)] = &[
    ("1", "Home"),
    ("2", "Calculator"),
    ("3", "Results"),
    ("4", "Chat"),
    ("5", "Resources"),
    ("q", "Quit"),
];
