pub mod diet;
pub mod energy;
pub mod engine;
pub mod renewable;
pub mod transport;
pub mod waste;

pub use engine::{email_suggestions, RulesEngine, GENERIC_SUGGESTIONS, MIN_SUGGESTIONS};

use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion};

/// Trait for per-category footprint rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a suggestion if its condition holds.
    ///
    /// The category rules only read the profile; the estimate is passed so a
    /// rule can key off computed emissions without changing the engine.
    fn evaluate(
        &self,
        profile: &HouseholdProfile,
        emissions: &EmissionBreakdown,
    ) -> Option<Suggestion>;
}
