//! External API integrations

pub mod email;
pub mod weather;

pub use email::{EmailSender, OutgoingEmail, ResendClient};
pub use weather::{WeatherClient, WeatherProvider};
