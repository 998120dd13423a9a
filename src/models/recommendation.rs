use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionCategory {
    Energy,
    Transport,
    Diet,
    Waste,
    Renewable,
    General,
}

impl SuggestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionCategory::Energy => "Energy",
            SuggestionCategory::Transport => "Transport",
            SuggestionCategory::Diet => "Diet",
            SuggestionCategory::Waste => "Waste",
            SuggestionCategory::Renewable => "Renewable",
            SuggestionCategory::General => "General",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            SuggestionCategory::Energy => Color::Yellow,
            SuggestionCategory::Transport => Color::LightRed,
            SuggestionCategory::Diet => Color::Green,
            SuggestionCategory::Waste => Color::Magenta,
            SuggestionCategory::Renewable => Color::Cyan,
            SuggestionCategory::General => Color::Gray,
        }
    }
}

impl std::fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the fixed tip catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub category: SuggestionCategory,
    pub text: String,
}

impl Suggestion {
    pub fn new(
        id: impl Into<String>,
        category: SuggestionCategory,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
