use serde::{Deserialize, Serialize};

/// Monthly emissions split by source, in kg CO2e.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown {
    pub energy: f64,
    pub transport: f64,
    pub waste: f64,
    pub diet_extra: f64,
}

impl EmissionBreakdown {
    pub fn total(&self) -> f64 {
        self.energy + self.transport + self.waste + self.diet_extra
    }

    /// Share of the total per household member. Sizes below one count as one.
    pub fn per_capita(&self, household_size: i64) -> f64 {
        self.total() / household_size.max(1) as f64
    }

    /// Components in display order, paired with their labels.
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("Energy", self.energy),
            ("Transport", self.transport),
            ("Waste", self.waste),
            ("Diet extra", self.diet_extra),
        ]
    }

    /// Label of the largest component, `None` when everything is zero.
    pub fn largest_source(&self) -> Option<&'static str> {
        self.components()
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(label, _)| label)
    }
}
