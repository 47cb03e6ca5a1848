//! Domain models for the FloodWatch alert service

mod alert;
mod location;
mod monitor;
mod registration;
mod weather;

pub use alert::*;
pub use location::*;
pub use monitor::*;
pub use registration::*;
pub use weather::*;
