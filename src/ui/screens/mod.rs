pub mod calculator;
pub mod chat;
pub mod home;
pub mod resources;
pub mod results;

pub use calculator::{CalculatorField, CalculatorScreen};
pub use chat::ChatScreen;
pub use home::HomeScreen;
pub use resources::ResourcesScreen;
pub use results::ResultsScreen;
