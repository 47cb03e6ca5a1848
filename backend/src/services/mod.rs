//! Business logic services for FloodWatch

pub mod monitor;
pub mod notification;
pub mod registration;
pub mod templates;

pub use monitor::{MonitorPass, MonitorService};
pub use notification::NotificationService;
pub use registration::{RegistrationOutcome, RegistrationService};
