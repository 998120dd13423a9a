use super::Rule;
use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion, SuggestionCategory};

pub const REDUCE_MEAT_TIP: &str =
    "Your diet includes animal products. Reduce red meat and add more plant-based meals 2–3 days a week \
     to lower food-related emissions.";

pub const CLIMATE_FRIENDLY_TIP: &str =
    "Your diet is already climate-friendly. Continue focusing on seasonal, local foods and avoid food waste.";

/// Diet rule, fires for every diet type.
pub struct DietRule;

impl Rule for DietRule {
    fn id(&self) -> &'static str {
        "diet"
    }

    fn name(&self) -> &'static str {
        "Food & Diet"
    }

    fn evaluate(
        &self,
        profile: &HouseholdProfile,
        _emissions: &EmissionBreakdown,
    ) -> Option<Suggestion> {
        let rec = if profile.diet.includes_meat() {
            Suggestion::new("diet_reduce_meat", SuggestionCategory::Diet, REDUCE_MEAT_TIP)
        } else {
            Suggestion::new(
                "diet_climate_friendly",
                SuggestionCategory::Diet,
                CLIMATE_FRIENDLY_TIP,
            )
        };

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DietType;

    #[test]
    fn meat_diets_get_reduce_meat() {
        for diet in [DietType::NonVeg, DietType::Mixed] {
            let profile = HouseholdProfile {
                diet,
                ..HouseholdProfile::default()
            };
            let rec = DietRule.evaluate(&profile, &EmissionBreakdown::default());
            assert_eq!(rec.map(|s| s.id).as_deref(), Some("diet_reduce_meat"));
        }
    }

    #[test]
    fn plant_diets_get_encouragement() {
        for diet in [DietType::Veg, DietType::Vegan] {
            let profile = HouseholdProfile {
                diet,
                ..HouseholdProfile::default()
            };
            let rec = DietRule.evaluate(&profile, &EmissionBreakdown::default());
            assert_eq!(rec.map(|s| s.id).as_deref(), Some("diet_climate_friendly"));
        }
    }
}
