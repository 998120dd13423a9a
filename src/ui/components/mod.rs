pub mod gauge;
pub mod input;
pub mod nav;

pub use gauge::{emission_gauge, share_gauge};
pub use input::{InputWidget, SelectWidget};
pub use nav::{nav_bar, SCREEN_KEYS};
