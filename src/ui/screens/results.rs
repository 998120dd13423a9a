use crate::app::Footprint;
use crate::ui::components::{emission_gauge, nav_bar, share_gauge, SCREEN_KEYS};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct ResultsScreen<'a> {
    pub footprint: Option<&'a Footprint>,
    pub status_message: Option<&'a str>,
}

impl<'a> ResultsScreen<'a> {
    pub fn new(footprint: Option<&'a Footprint>) -> Self {
        Self {
            footprint,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for ResultsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(4), // Total + per capita
                Constraint::Length(4), // Breakdown
                Constraint::Min(6),    // Suggestions
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        Paragraph::new(Span::styled("Your Monthly Footprint", Theme::title()))
            .render(chunks[0], buf);

        let Some(footprint) = self.footprint else {
            let para = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No footprint yet. Fill in the calculator [2] and press [c] to calculate.",
                    Theme::dim(),
                )),
            ]);
            para.render(chunks[1], buf);
            self.render_footer(chunks[4], chunks[5], buf);
            return;
        };

        self.render_totals(footprint, chunks[1], buf);
        self.render_breakdown(footprint, chunks[2], buf);
        self.render_suggestions(footprint, chunks[3], buf);
        self.render_footer(chunks[4], chunks[5], buf);
    }
}

impl ResultsScreen<'_> {
    fn render_totals(&self, footprint: &Footprint, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let total = footprint.emissions.total();
        emission_gauge("Total (kg CO₂e / month)", Some(total)).render(cols[0], buf);

        let block = Block::default()
            .title("Per person")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(cols[1]);
        block.render(cols[1], buf);

        let largest = footprint.emissions.largest_source().unwrap_or("None");
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{:.2} kg", footprint.per_capita()), Theme::highlight()),
                Span::styled(
                    format!(" across {} people", footprint.profile.household_size.max(1)),
                    Theme::dim(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Largest source: ", Theme::dim()),
                Span::styled(largest, Theme::normal()),
            ]),
        ];
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_breakdown(&self, footprint: &Footprint, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let total = footprint.emissions.total();
        let components = footprint.emissions.components();
        for ((label, value), col) in components.into_iter().zip(cols.iter()) {
            share_gauge(label, value, total).render(*col, buf);
        }
    }

    fn render_suggestions(&self, footprint: &Footprint, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Suggestions", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        if let Some(top) = footprint.top_suggestion() {
            let line = Line::from(vec![
                Span::styled("Top suggestion: ", Theme::highlight()),
                Span::styled(top.text.as_str(), Theme::normal()),
            ]);
            Paragraph::new(line)
                .wrap(Wrap { trim: true })
                .render(rows[0], buf);
        }

        // Everything after the top pick; the first two are the other key ones
        // that go into the email.
        let key_count = footprint.email_suggestions().len();
        let items: Vec<ListItem> = footprint
            .suggestions
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, s)| {
                let marker = if i < key_count { "★ " } else { "• " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(s.category.color())),
                    Span::styled(
                        format!("[{}] ", s.category),
                        Style::default().fg(s.category.color()),
                    ),
                    Span::styled(s.text.as_str(), Theme::normal()),
                ]))
            })
            .collect();

        List::new(items).render(rows[1], buf);
    }

    fn render_footer(&self, status_area: Rect, nav_area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.starts_with("Error") || msg.contains("failed") {
                Theme::error()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(status_area, buf);
        }

        Paragraph::new(nav_bar(SCREEN_KEYS)).render(nav_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{estimate, RulesEngine};
    use crate::models::HouseholdProfile;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_placeholder_without_footprint() {
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        ResultsScreen::new(None).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No footprint yet"));
    }

    #[test]
    fn renders_total_and_top_suggestion() {
        let profile = HouseholdProfile::default();
        let emissions = estimate(&profile);
        let suggestions = RulesEngine::new().evaluate(&profile, &emissions);
        let footprint = Footprint {
            profile,
            emissions,
            suggestions,
        };

        let area = Rect::new(0, 0, 120, 24);
        let mut buf = Buffer::empty(area);
        ResultsScreen::new(Some(&footprint)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains(&format!("{:.2} kg", emissions.total())));
        assert!(text.contains("Top suggestion:"));
    }
}
