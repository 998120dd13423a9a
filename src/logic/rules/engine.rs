use super::{
    diet::DietRule, energy::EnergyRule, renewable::RenewableRule, transport::TransportRule,
    waste::WasteRule, Rule,
};
use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion, SuggestionCategory};

/// Every evaluation returns at least this many suggestions.
pub const MIN_SUGGESTIONS: usize = 3;

/// Padding pool, used in this order when fewer rules fire than required.
pub const GENERIC_SUGGESTIONS: &[(&str, &str)] = &[
    (
        "generic_bottle_bag",
        "Carry your own water bottle and cloth bag to avoid single-use plastics.",
    ),
    (
        "generic_trees",
        "Plant native trees or support local tree-planting drives.",
    ),
    (
        "generic_weekly_habit",
        "Review one habit each week (energy, travel, food, or waste) and try a small improvement.",
    ),
];

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        // Evaluation order is the order suggestions are shown in.
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(EnergyRule),
            Box::new(TransportRule),
            Box::new(DietRule),
            Box::new(WasteRule),
            Box::new(RenewableRule),
        ];

        Self { rules }
    }

    /// Run every rule in category order, then pad from the generic pool
    /// until `MIN_SUGGESTIONS` is reached.
    pub fn evaluate(
        &self,
        profile: &HouseholdProfile,
        emissions: &EmissionBreakdown,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = Vec::new();

        for rule in &self.rules {
            if let Some(suggestion) = rule.evaluate(profile, emissions) {
                tracing::debug!(rule = rule.id(), suggestion = %suggestion.id, "rule fired");
                push_unique(&mut suggestions, suggestion);
            }
        }

        for (id, text) in GENERIC_SUGGESTIONS {
            if suggestions.len() >= MIN_SUGGESTIONS {
                break;
            }
            push_unique(
                &mut suggestions,
                Suggestion::new(*id, SuggestionCategory::General, *text),
            );
        }

        suggestions
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        profile: &HouseholdProfile,
        emissions: &EmissionBreakdown,
    ) -> Option<Suggestion> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(profile, emissions))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn push_unique(suggestions: &mut Vec<Suggestion>, suggestion: Suggestion) {
    if !suggestions.iter().any(|s| s.text == suggestion.text) {
        suggestions.push(suggestion);
    }
}

/// The suggestions that go into the short email, at most `MIN_SUGGESTIONS`.
pub fn email_suggestions(suggestions: &[Suggestion]) -> &[Suggestion] {
    &suggestions[..suggestions.len().min(MIN_SUGGESTIONS)]
}
