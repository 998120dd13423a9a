use crate::ui::components::{nav_bar, SCREEN_KEYS};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct Resource {
    pub name: &'static str,
    pub url: &'static str,
    pub about: &'static str,
}

pub const CENTRAL: &[Resource] = &[
    Resource {
        name: "Press Information Bureau (PIB)",
        url: "https://pib.gov.in/",
        about: "Govt press releases on climate & COP updates",
    },
    Resource {
        name: "Ministry of Environment, Forest & Climate Change (MoEFCC)",
        url: "https://moef.gov.in/",
        about: "NAPCC, Annual Report",
    },
    Resource {
        name: "NITI Aayog",
        url: "https://niti.gov.in/",
        about: "Policy reports, climate dashboards",
    },
    Resource {
        name: "Central Pollution Control Board (CPCB)",
        url: "https://cpcb.nic.in/",
        about: "Technical guidelines & SOPs",
    },
];

pub const STATE: &[Resource] = &[
    Resource {
        name: "Maharashtra SDMA",
        url: "https://sdma.maharashtra.gov.in/",
        about: "State Disaster Management Authority",
    },
    Resource {
        name: "Karnataka EMPRI",
        url: "https://empri.karnataka.gov.in/",
        about: "Environmental Management & Policy Research Institute",
    },
];

pub struct ResourcesScreen;

impl Widget for ResourcesScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(CENTRAL.len() as u16 * 2 + 2),
                Constraint::Length(STATE.len() as u16 * 2 + 2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Official updates & resources (central and state)",
            Theme::title(),
        ))
        .render(chunks[0], buf);

        render_group("Central & key institutions", CENTRAL, chunks[1], buf);
        render_group("State-level examples", STATE, chunks[2], buf);

        Paragraph::new(nav_bar(SCREEN_KEYS)).render(chunks[4], buf);
    }
}

fn render_group(title: &str, resources: &[Resource], area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(Span::styled(title, Theme::header()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let items: Vec<ListItem> = resources
        .iter()
        .map(|r| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(r.name, Theme::highlight()),
                    Span::styled(format!(" - {}", r.about), Theme::dim()),
                ]),
                Line::from(Span::styled(format!("  {}", r.url), Theme::normal())),
            ])
        })
        .collect();

    List::new(items).block(block).render(area, buf);
}
