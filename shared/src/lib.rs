//! Shared types and models for the FloodWatch alert service
//!
//! This crate contains the domain types shared between the backend and any
//! other component that needs to speak the FloodWatch wire format.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
