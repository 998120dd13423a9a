use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Boxed value with a one-line horizontal bar underneath.
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    max: f64,
    color: Color,
    suffix: Option<String>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            max: 100.0,
            color: Theme::FG,
            suffix: None,
            precision: 1,
        }
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn ratio(&self, value: f64) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (value / self.max).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let mut spans = vec![Span::styled(
                    format!("{:.prec$}{}", value, self.unit, prec = self.precision),
                    Style::default().fg(self.color),
                )];
                if let Some(ref suffix) = self.suffix {
                    spans.push(Span::styled(format!(" {}", suffix), Theme::dim()));
                }
                Paragraph::new(Line::from(spans)).render(inner, buf);

                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let filled = (bar_area.width as f64 * self.ratio(value)) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(self.color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(na_line).render(inner, buf);
            }
        }
    }
}

/// Monthly total, colored by how heavy it is.
pub fn emission_gauge(title: &str, total_kg: Option<f64>) -> GaugeWidget<'_> {
    let color = total_kg.map(Theme::emission_color).unwrap_or(Theme::FG);
    GaugeWidget::new(title, total_kg, " kg")
        .max(500.0)
        .precision(2)
        .color(color)
}

/// One breakdown component, bar scaled to its share of the total.
pub fn share_gauge(title: &str, value_kg: f64, total_kg: f64) -> GaugeWidget<'_> {
    let share = if total_kg > 0.0 {
        value_kg / total_kg * 100.0
    } else {
        0.0
    };
    GaugeWidget::new(title, Some(value_kg), " kg")
        .max(total_kg)
        .color(Theme::HIGHLIGHT)
        .suffix(format!("({:.0}%)", share))
}
