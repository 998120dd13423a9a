use super::Rule;
use crate::logic::thresholds::{travel_band, Band};
use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion, SuggestionCategory};

pub const MAJOR_SOURCE_TIP: &str =
    "Your private vehicle travel is a major source of emissions. Try carpooling, using public transport, \
     and combining errands so you drive fewer kilometres.";

pub const REPLACE_TRIPS_TIP: &str =
    "Replace some short private vehicle trips with walking, cycling, or public transport to cut fuel use and emissions.";

pub const KEEP_IT_UP_TIP: &str =
    "You already use public transport. Keep it up, and consider walking or cycling for very short distances.";

/// Travel mode and distance rule
///
/// Private vehicles (car, bike) are graded by monthly distance. Bus and
/// train riders get encouragement regardless of distance. No tip when
/// the household reports no vehicle.
pub struct TransportRule;

impl Rule for TransportRule {
    fn id(&self) -> &'static str {
        "transport"
    }

    fn name(&self) -> &'static str {
        "Transport & Travel"
    }

    fn evaluate(
        &self,
        profile: &HouseholdProfile,
        _emissions: &EmissionBreakdown,
    ) -> Option<Suggestion> {
        let vehicle = profile.vehicle_type;

        if vehicle.is_private() {
            return match travel_band(profile.travel_km) {
                Band::High => Some(Suggestion::new(
                    "transport_major",
                    SuggestionCategory::Transport,
                    MAJOR_SOURCE_TIP,
                )),
                Band::Moderate => Some(Suggestion::new(
                    "transport_replace_trips",
                    SuggestionCategory::Transport,
                    REPLACE_TRIPS_TIP,
                )),
                Band::Low => None,
            };
        }

        if vehicle.is_public() {
            return Some(Suggestion::new(
                "transport_keep_it_up",
                SuggestionCategory::Transport,
                KEEP_IT_UP_TIP,
            ));
        }

        None
    }
}
