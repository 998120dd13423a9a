use super::Rule;
use crate::logic::thresholds::{waste_band, Band};
use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion, SuggestionCategory};

pub const SEGREGATE_TIP: &str =
    "You generate quite a lot of waste. Start segregating at source, compost kitchen scraps, \
     and cut down on single-use plastics.";

pub const REDUCE_WASTE_TIP: &str =
    "Work on reducing waste by buying only what you need, reusing containers, and saying no to single-use plastics.";

/// Household waste rule
///
/// Over 30 kg/month: segregate and compost. 15-30 kg/month: reduce.
pub struct WasteRule;

impl Rule for WasteRule {
    fn id(&self) -> &'static str {
        "waste"
    }

    fn name(&self) -> &'static str {
        "Waste & Lifestyle"
    }

    fn evaluate(
        &self,
        profile: &HouseholdProfile,
        _emissions: &EmissionBreakdown,
    ) -> Option<Suggestion> {
        match waste_band(profile.waste_kg) {
            Band::High => Some(Suggestion::new(
                "waste_segregate",
                SuggestionCategory::Waste,
                SEGREGATE_TIP,
            )),
            Band::Moderate => Some(Suggestion::new(
                "waste_reduce",
                SuggestionCategory::Waste,
                REDUCE_WASTE_TIP,
            )),
            Band::Low => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(kg: f64) -> Option<String> {
        let profile = HouseholdProfile {
            waste_kg: kg,
            ..HouseholdProfile::default()
        };
        WasteRule
            .evaluate(&profile, &EmissionBreakdown::default())
            .map(|s| s.id)
    }

    #[test]
    fn fires_by_band() {
        assert_eq!(evaluate(40.0).as_deref(), Some("waste_segregate"));
        assert_eq!(evaluate(30.0).as_deref(), Some("waste_reduce"));
        assert_eq!(evaluate(16.0).as_deref(), Some("waste_reduce"));
        assert_eq!(evaluate(15.0), None);
    }
}
