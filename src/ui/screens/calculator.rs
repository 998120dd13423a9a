use crate::ui::components::{nav_bar, InputWidget, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorField {
    Email,
    Name,
    Electricity,
    ElectricitySource,
    Lpg,
    VehicleType,
    Travel,
    Efficiency,
    Diet,
    Waste,
    Household,
    Renewable,
}

impl CalculatorField {
    pub fn all() -> &'static [CalculatorField] {
        &[
            CalculatorField::Email,
            CalculatorField::Name,
            CalculatorField::Electricity,
            CalculatorField::ElectricitySource,
            CalculatorField::Lpg,
            CalculatorField::VehicleType,
            CalculatorField::Travel,
            CalculatorField::Efficiency,
            CalculatorField::Diet,
            CalculatorField::Waste,
            CalculatorField::Household,
            CalculatorField::Renewable,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalculatorField::Email => "Email (for report)",
            CalculatorField::Name => "Your name",
            CalculatorField::Electricity => "Electricity (kWh/month)",
            CalculatorField::ElectricitySource => "Electricity source",
            CalculatorField::Lpg => "LPG / gas (kg/month)",
            CalculatorField::VehicleType => "Vehicle type",
            CalculatorField::Travel => "Distance (km/month)",
            CalculatorField::Efficiency => "Efficiency (km/l or km/kWh)",
            CalculatorField::Diet => "Diet type",
            CalculatorField::Waste => "Waste (kg/month)",
            CalculatorField::Household => "People in household",
            CalculatorField::Renewable => "Renewable share (%)",
        }
    }

    /// Select fields cycle with ←/→ instead of opening a text editor.
    pub fn is_select(&self) -> bool {
        matches!(
            self,
            CalculatorField::ElectricitySource
                | CalculatorField::VehicleType
                | CalculatorField::Diet
        )
    }

    pub fn help(&self) -> &'static str {
        match self {
            CalculatorField::Email => {
                "Leave blank to skip the emailed report. The report is sent when you calculate."
            }
            CalculatorField::Name => "Used in the report greeting",
            CalculatorField::Electricity => "Monthly electricity consumption, minimum 0",
            CalculatorField::ElectricitySource => "Options: Coal, Renewable, Mixed",
            CalculatorField::Lpg => "Cooking gas used per month, minimum 0",
            CalculatorField::VehicleType => "Options: car, bike, bus, train, none",
            CalculatorField::Travel => "Distance travelled per month, minimum 0",
            CalculatorField::Efficiency => "Fuel efficiency of your vehicle, minimum 0",
            CalculatorField::Diet => "Options: veg, nonveg, vegan, mixed",
            CalculatorField::Waste => "Household waste generated per month, minimum 0",
            CalculatorField::Household => "Number of people sharing the footprint, minimum 1",
            CalculatorField::Renewable => "Share of electricity from renewables, 0 to 100",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

pub struct CalculatorScreen<'a> {
    /// Display values, indexed by `CalculatorField::index`.
    pub values: &'a [String],
    pub focused_field: CalculatorField,
    pub editing: bool,
    pub edit_buffer: &'a str,
    pub status_message: Option<&'a str>,
}

impl<'a> CalculatorScreen<'a> {
    pub fn new(values: &'a [String]) -> Self {
        Self {
            values,
            focused_field: CalculatorField::Email,
            editing: false,
            edit_buffer: "",
            status_message: None,
        }
    }

    pub fn with_focus(mut self, field: CalculatorField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn editing(mut self, editing: bool, buffer: &'a str) -> Self {
        self.editing = editing;
        self.edit_buffer = buffer;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    fn value(&self, field: CalculatorField) -> &str {
        self.values
            .get(field.index())
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Widget for CalculatorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Title
                Constraint::Min(20),    // Form (6 rows * 3 lines + borders)
                Constraint::Length(3),  // Help
                Constraint::Length(1),  // Status
                Constraint::Length(1),  // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Carbon Footprint Calculator", Theme::title()),
            Span::styled(" - enter your monthly details", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_form(chunks[1], buf);
        self.render_help(chunks[2], buf);

        if let Some(status) = self.status_message {
            Paragraph::new(Span::styled(status, Theme::warning())).render(chunks[3], buf);
        }

        let nav = if self.editing {
            nav_bar(&[("Enter", "Apply"), ("Esc", "Cancel")])
        } else {
            nav_bar(&[
                ("↑↓", "Navigate"),
                ("Enter", "Edit"),
                ("←→", "Change option"),
                ("c", "Calculate"),
                ("Esc", "Back"),
            ])
        };
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl CalculatorScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Monthly Profile")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let (left, right) = CalculatorField::all().split_at(6);
        self.render_column(left, columns[0], buf);
        self.render_column(right, columns[1], buf);
    }

    fn render_column(&self, fields: &[CalculatorField], area: Rect, buf: &mut Buffer) {
        let constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();

        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (field, field_area) in fields.iter().zip(field_areas.iter()) {
            let is_focused = *field == self.focused_field;

            if field.is_select() {
                SelectWidget::new(field.label(), self.value(*field))
                    .focused(is_focused)
                    .render(*field_area, buf);
            } else if is_focused && self.editing {
                InputWidget::new(field.label(), self.edit_buffer)
                    .focused(true)
                    .editing(true)
                    .render(*field_area, buf);
            } else {
                InputWidget::new(field.label(), self.value(*field))
                    .focused(is_focused)
                    .placeholder("Not set")
                    .render(*field_area, buf);
            }
        }
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.focused_field.label())
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Span::styled(self.focused_field.help(), Theme::dim()))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
