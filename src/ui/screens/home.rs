use crate::ui::components::{nav_bar, SCREEN_KEYS};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const WHY_IT_MATTERS: &str = "Climate change is already affecting communities, economies and \
ecosystems across India and the world. Individual lifestyle choices in transport, energy use, \
diet and waste add up to national emissions.";

const HOW_IT_HELPS: &str = "Enter a month of household activity in the calculator to see your \
estimated emissions, where they come from, and a short list of tips you can act on this week. \
Add your email address to receive the report in your inbox.";

const SDG13: &str = "SDG 13 asks countries and individuals to strengthen resilience to climate \
hazards, integrate climate measures into policy, and improve education and awareness.";

pub const QUICK_ACTIONS: &[&str] = &[
    "Switch to LED bulbs & unplug idle devices",
    "Use public transport / cycle for short trips",
    "Reduce red-meat consumption; prefer plant-based meals",
    "Compost organic waste; avoid single-use plastics",
    "Support local tree-planting and energy-efficiency programs",
];

pub struct HomeScreen<'a> {
    pub name: &'a str,
    pub last_total: Option<f64>,
}

impl<'a> HomeScreen<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            last_total: None,
        }
    }

    pub fn with_last_total(mut self, total: Option<f64>) -> Self {
        self.last_total = total;
        self
    }
}

impl Widget for HomeScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // About
                Constraint::Length(QUICK_ACTIONS.len() as u16 + 2),
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let block = Block::default()
            .title(Span::styled(
                "CarbonWise - Carbon Emission Measurement",
                Theme::title(),
            ))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let greeting = match self.last_total {
            Some(total) => Line::from(vec![
                Span::styled(
                    format!("Welcome back, {}. Last estimate: ", self.name),
                    Theme::dim(),
                ),
                Span::styled(
                    format!("{:.2} kg CO₂e", total),
                    ratatui::style::Style::default().fg(Theme::emission_color(total)),
                ),
            ]),
            None => Line::from(Span::styled(
                format!(
                    "Welcome, {}. SDG 13 (Climate Action): measurement, awareness, action",
                    self.name
                ),
                Theme::dim(),
            )),
        };
        Paragraph::new(greeting).block(block).render(chunks[0], buf);

        let about = vec![
            Line::from(Span::styled("Why this matters", Theme::header())),
            Line::from(Span::styled(WHY_IT_MATTERS, Theme::normal())),
            Line::from(""),
            Line::from(Span::styled("How this tool helps", Theme::header())),
            Line::from(Span::styled(HOW_IT_HELPS, Theme::normal())),
            Line::from(""),
            Line::from(Span::styled("SDG 13 - Climate Action", Theme::header())),
            Line::from(Span::styled(SDG13, Theme::normal())),
        ];
        Paragraph::new(about)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        let actions_block = Block::default()
            .title(Span::styled("Quick actions you can take today", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let lines: Vec<Line> = QUICK_ACTIONS
            .iter()
            .map(|a| {
                Line::from(vec![
                    Span::styled("• ", Theme::success()),
                    Span::styled(*a, Theme::normal()),
                ])
            })
            .collect();
        Paragraph::new(lines)
            .block(actions_block)
            .render(chunks[2], buf);

        Paragraph::new(nav_bar(SCREEN_KEYS)).render(chunks[3], buf);
    }
}
