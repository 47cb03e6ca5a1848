//! Validation utilities for FloodWatch requests

use thiserror::Error;

use crate::models::{AlertMessage, NewRegistration};

/// A request field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate that a required text field is present
pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", field)));
    }
    Ok(())
}

/// Validate email format (basic shape check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format");
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    let domain_ok = domain.contains('.')
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if local.is_empty() || !domain_ok {
        return Err("Invalid email format");
    }
    Ok(())
}

/// Validate phone number format
/// Accepts 7-15 digits with an optional leading `+` and `-`, `(`, `)` or
/// space separators: +91 98765 43210, (022) 2345-6789
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let body = phone.trim().strip_prefix('+').unwrap_or(phone.trim());

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '(' | ')' | ' '))
    {
        return Err("Phone number may only contain digits, spaces, dashes and parentheses");
    }

    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err("Phone number must have between 7 and 15 digits");
    }
    Ok(())
}

// ============================================================================
// Request Validations
// ============================================================================

/// Validate a registration before it is persisted
pub fn validate_registration(registration: &NewRegistration) -> Result<(), ValidationError> {
    validate_required("name", &registration.name)?;
    validate_required("email", &registration.email)?;
    validate_required("location", &registration.location)?;

    validate_email(&registration.email).map_err(|msg| ValidationError::new("email", msg))?;

    if let Some(phone) = registration.phone.as_deref() {
        validate_phone(phone).map_err(|msg| ValidationError::new("phone", msg))?;
    }

    if !registration.notifications.any() {
        return Err(ValidationError::new(
            "notifications",
            "Please select at least one notification method",
        ));
    }

    if !registration.alert_levels.any() {
        return Err(ValidationError::new(
            "alertLevels",
            "Please select at least one alert level",
        ));
    }

    Ok(())
}

/// Validate an alert broadcast request
pub fn validate_alert_message(alert: &AlertMessage) -> Result<(), ValidationError> {
    validate_required("location", &alert.location)?;
    validate_required("title", &alert.title)?;
    validate_required("message", &alert.message)?;
    Ok(())
}
