use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered single-line text field.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
    editing: bool,
    placeholder: Option<&'a str>,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            editing: false,
            placeholder: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.editing {
            Line::from(vec![
                Span::styled(self.value, Theme::highlight()),
                Span::styled(" ", Theme::selected()),
            ])
        } else if self.value.is_empty() {
            Line::from(Span::styled(self.placeholder.unwrap_or(""), Theme::dim()))
        } else if self.focused {
            Line::from(Span::styled(self.value, Theme::selected()))
        } else {
            Line::from(Span::styled(self.value, Theme::normal()))
        };

        Paragraph::new(line).render(inner, buf);
    }
}

/// Bordered field showing one option out of a fixed list.
pub struct SelectWidget<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let display = if self.focused {
            format!("< {} >", self.value)
        } else {
            self.value.to_string()
        };

        let style = if self.focused {
            Theme::highlight()
        } else {
            Theme::normal()
        };

        Paragraph::new(Span::styled(display, style)).render(inner, buf);
    }
}
