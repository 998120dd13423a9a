use crate::models::{ChatEntry, Speaker};
use crate::ui::components::{nav_bar, InputWidget, SCREEN_KEYS};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ChatScreen<'a> {
    pub entries: &'a [ChatEntry],
    pub input: &'a str,
    pub typing: bool,
    pub configured: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> ChatScreen<'a> {
    pub fn new(entries: &'a [ChatEntry], input: &'a str) -> Self {
        Self {
            entries,
            input,
            typing: false,
            configured: true,
            status_message: None,
        }
    }

    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    pub fn configured(mut self, configured: bool) -> Self {
        self.configured = configured;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    fn speaker_style(speaker: Speaker) -> Style {
        let color = match speaker {
            Speaker::You => Theme::SPEAKER_YOU,
            Speaker::Bot => Theme::SPEAKER_BOT,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

impl Widget for ChatScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(5),    // Transcript
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let mut header = vec![Line::from(Span::styled(
            "Sustainability Chatbot",
            Theme::title(),
        ))];
        if self.configured {
            header.push(Line::from(Span::styled(
                "Ask about saving energy, food emissions, recycling...",
                Theme::dim(),
            )));
        } else {
            header.push(Line::from(Span::styled(
                "Gemini API key not configured - run `carbonwise init` or set GEMINI_API_KEY",
                Theme::warning(),
            )));
        }
        Paragraph::new(header).render(chunks[0], buf);

        self.render_transcript(chunks[1], buf);

        InputWidget::new("Type your question here", self.input)
            .focused(self.typing)
            .editing(self.typing)
            .placeholder("Press [i] to start typing")
            .render(chunks[2], buf);

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::warning())).render(chunks[3], buf);
        }

        let nav = if self.typing {
            nav_bar(&[("Enter", "Send"), ("Esc", "Stop typing")])
        } else {
            let mut keys = vec![("i", "Type")];
            keys.extend_from_slice(SCREEN_KEYS);
            nav_bar(&keys)
        };
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl ChatScreen<'_> {
    fn render_transcript(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Conversation", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new(Span::styled("No messages yet", Theme::dim())).render(inner, buf);
            return;
        }

        let lines: Vec<Line> = self
            .entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(entry.at.format("%H:%M ").to_string(), Theme::dim()),
                    Span::styled(
                        format!("{}: ", entry.speaker),
                        Self::speaker_style(entry.speaker),
                    ),
                    Span::styled(entry.text.as_str(), Theme::normal()),
                ])
            })
            .collect();

        // Keep the latest exchange in view. Rough estimate: one row per entry
        // plus wrapping, so scroll past whatever does not fit.
        let width = inner.width.max(1) as usize;
        let rows: usize = lines
            .iter()
            .map(|l| l.width().div_ceil(width).max(1))
            .sum();
        let scroll = rows.saturating_sub(inner.height as usize) as u16;

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}
