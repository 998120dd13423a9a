use super::Rule;
use crate::logic::thresholds::renewable_is_low;
use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion, SuggestionCategory};

pub const INCREASE_RENEWABLE_TIP: &str =
    "Increase your share of renewable energy over time — explore rooftop solar or green power options \
     if they are available in your area.";

/// Fires when less than a fifth of household electricity is renewable.
pub struct RenewableRule;

impl Rule for RenewableRule {
    fn id(&self) -> &'static str {
        "renewable"
    }

    fn name(&self) -> &'static str {
        "Renewable Share"
    }

    fn evaluate(
        &self,
        profile: &HouseholdProfile,
        _emissions: &EmissionBreakdown,
    ) -> Option<Suggestion> {
        if !renewable_is_low(profile.renewable_percent) {
            return None;
        }

        Some(Suggestion::new(
            "renewable_increase",
            SuggestionCategory::Renewable,
            INCREASE_RENEWABLE_TIP,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_below_twenty_percent() {
        let low = HouseholdProfile {
            renewable_percent: 10.0,
            ..HouseholdProfile::default()
        };
        let enough = HouseholdProfile {
            renewable_percent: 20.0,
            ..HouseholdProfile::default()
        };
        let none = EmissionBreakdown::default();

        assert!(RenewableRule.evaluate(&low, &none).is_some());
        assert!(RenewableRule.evaluate(&enough, &none).is_none());
    }
}
