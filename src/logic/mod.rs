pub mod assistant;
pub mod estimator;
pub mod report;
pub mod rules;
pub mod thresholds;

pub use assistant::SustainabilityAssistant;
pub use estimator::estimate;
pub use rules::RulesEngine;
