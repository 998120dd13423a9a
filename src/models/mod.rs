pub mod chat;
pub mod emission;
pub mod profile;
pub mod recommendation;

pub use chat::*;
pub use emission::*;
pub use profile::*;
pub use recommendation::*;
