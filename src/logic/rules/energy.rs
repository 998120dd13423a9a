use super::Rule;
use crate::logic::thresholds::{electricity_band, Band};
use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion, SuggestionCategory};

pub const HIGH_USAGE_TIP: &str =
    "Your electricity use is quite high. Shift fully to LED bulbs, keep AC at 24–26°C, \
     and unplug chargers/devices when not in use to reduce demand.";

pub const MODERATE_USAGE_TIP: &str =
    "Focus on home energy efficiency: use LED bulbs, switch off fans/lights when you leave the room, \
     and run washing machines only with full loads.";

/// Home electricity consumption rule
///
/// Above 250 kWh/month asks for demand cuts; 100-250 kWh/month gets
/// general efficiency advice. Nothing below that.
pub struct EnergyRule;

impl Rule for EnergyRule {
    fn id(&self) -> &'static str {
        "energy"
    }

    fn name(&self) -> &'static str {
        "Home Electricity Use"
    }

    fn evaluate(
        &self,
        profile: &HouseholdProfile,
        _emissions: &EmissionBreakdown,
    ) -> Option<Suggestion> {
        match electricity_band(profile.electricity_kwh) {
            Band::High => Some(Suggestion::new(
                "energy_high",
                SuggestionCategory::Energy,
                HIGH_USAGE_TIP,
            )),
            Band::Moderate => Some(Suggestion::new(
                "energy_moderate",
                SuggestionCategory::Energy,
                MODERATE_USAGE_TIP,
            )),
            Band::Low => None,
        }
    }
}
