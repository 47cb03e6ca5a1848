//! Alert text and email bodies
//!
//! Every value interpolated into HTML goes through [`html_escape`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{AlertConditions, AlertLevel, AlertMessage, Registration, WeatherSample};

pub const REGISTRATION_SUBJECT: &str = "Registration Confirmed - Weather Alert System";

/// Escape text for safe inclusion in HTML element content and attributes
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Banner colour, panel background and panel text colour for a level
fn palette(level: AlertLevel) -> (&'static str, &'static str, &'static str) {
    match level {
        AlertLevel::Critical => ("#dc2626", "#fef2f2", "#7f1d1d"),
        AlertLevel::Warning => ("#f59e0b", "#fffbeb", "#92400e"),
        AlertLevel::Safe => ("#10b981", "#f0fdf4", "#14532d"),
    }
}

fn call_to_action(level: AlertLevel) -> (&'static str, &'static str) {
    match level {
        AlertLevel::Critical => (
            "🚨 IMMEDIATE ACTION REQUIRED",
            "Follow evacuation orders immediately. Move to higher ground.",
        ),
        AlertLevel::Warning => (
            "⚠️ STAY ALERT AND PREPARED",
            "Monitor conditions closely and be ready to take action.",
        ),
        AlertLevel::Safe => (
            "✅ CONDITIONS ARE IMPROVING",
            "Continue to stay informed but risk levels are decreasing.",
        ),
    }
}

/// Title for an automatically generated alert
pub fn alert_title(level: AlertLevel, location: &str) -> String {
    match level {
        AlertLevel::Critical => format!("🚨 CRITICAL FLOOD ALERT - {}", location),
        AlertLevel::Warning => format!("⚠️ FLOOD WARNING - {}", location),
        AlertLevel::Safe => format!("✅ Weather Update - {}", location),
    }
}

/// Notable conditions worth calling out in an alert message
fn notable_conditions(sample: &WeatherSample) -> Vec<String> {
    let mut notable = Vec::new();
    if sample.rainfall_last_hour > Decimal::ZERO {
        notable.push(format!("Heavy rainfall: {}mm/hr", sample.rainfall_last_hour));
    }
    if sample.wind_speed > Decimal::from(40) {
        notable.push(format!("Strong winds: {} km/h", sample.wind_speed.round_dp(2)));
    }
    if sample.humidity > Decimal::from(80) {
        notable.push(format!("High humidity: {}%", sample.humidity));
    }
    notable
}

/// Body text for an automatically generated alert
pub fn alert_text(level: AlertLevel, sample: &WeatherSample) -> String {
    let notable = notable_conditions(sample).join(", ");
    let location = &sample.location;

    match level {
        AlertLevel::Critical => format!(
            "IMMEDIATE ACTION REQUIRED! Severe weather conditions detected in {}. {}. \
             Current weather: {}. Please move to higher ground immediately and follow evacuation orders.",
            location, notable, sample.description
        ),
        AlertLevel::Warning => format!(
            "Weather conditions in {} indicate potential flooding risk. {}. \
             Current weather: {}. Please stay alert and avoid low-lying areas.",
            location, notable, sample.description
        ),
        AlertLevel::Safe => format!(
            "Current conditions in {} are stable. Temperature: {}°C, Humidity: {}%, Wind: {} km/h. Weather: {}.",
            location,
            sample.temperature,
            sample.humidity,
            sample.wind_speed.round_dp(2),
            sample.description
        ),
    }
}

/// Build the alert a monitoring pass broadcasts for `sample`
pub fn alert_for_sample(level: AlertLevel, sample: &WeatherSample) -> AlertMessage {
    AlertMessage {
        location: sample.location.clone(),
        alert_level: level,
        title: alert_title(level, &sample.location),
        message: alert_text(level, sample),
        conditions: Some(AlertConditions::from(sample)),
    }
}

/// Subject line of an alert email
pub fn alert_subject(level: AlertLevel, location: &str) -> String {
    format!(
        "{} {} FLOOD ALERT - {}",
        level.icon(),
        level.as_str().to_uppercase(),
        location
    )
}

fn conditions_html(conditions: &AlertConditions) -> String {
    let items: String = conditions
        .entries()
        .into_iter()
        .map(|(label, value)| format!("<li><strong>{}:</strong> {}</li>", label, html_escape(value)))
        .collect();

    format!(
        r#"<div style="background: #f1f5f9; padding: 15px; border-radius: 8px; margin: 15px 0;">
  <h4 style="color: #1e293b; margin-top: 0;">Current Conditions:</h4>
  <ul style="color: #475569; margin: 0;">{}</ul>
</div>"#,
        items
    )
}

/// HTML body of an alert email for one recipient
pub fn alert_email_html(
    alert: &AlertMessage,
    recipient: &Registration,
    sent_at: DateTime<Utc>,
) -> String {
    let level = alert.alert_level;
    let (banner, panel, panel_text) = palette(level);
    let (action_heading, action_text) = call_to_action(level);
    let upper = level.as_str().to_uppercase();
    let location = html_escape(&recipient.location);

    let conditions = alert
        .conditions
        .as_ref()
        .filter(|c| !c.is_empty())
        .map(conditions_html)
        .unwrap_or_default();

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: {banner}; padding: 25px; border-radius: 10px; text-align: center; margin-bottom: 20px;">
    <h1 style="color: white; margin: 0; font-size: 24px;">{icon} FLOOD ALERT</h1>
    <p style="color: white; margin: 10px 0 0 0; font-size: 18px; font-weight: bold;">{upper} - {location}</p>
  </div>
  <div style="background: #f8fafc; padding: 25px; border-radius: 8px; margin-bottom: 20px;">
    <h2 style="color: #1e293b; margin-top: 0;">{title}</h2>
    <p style="color: #475569; line-height: 1.6; font-size: 16px;">Hello {name},</p>
    <p style="color: #475569; line-height: 1.6; font-size: 16px;">{message}</p>
    {conditions}
    <div style="background: {panel}; padding: 15px; border-radius: 8px; border-left: 4px solid {banner}; margin: 20px 0;">
      <p style="color: {panel_text}; margin: 0; font-weight: bold;">{action_heading}</p>
      <p style="color: {panel_text}; margin: 5px 0 0 0;">{action_text}</p>
    </div>
    <p style="color: #475569; line-height: 1.6; font-size: 14px; margin-top: 20px;">
      This alert was sent because you registered for {level} alerts in {location}.
      Stay safe and follow local emergency guidelines.
    </p>
  </div>
  <div style="text-align: center; padding: 20px 0;">
    <div style="background: #1e293b; color: white; padding: 15px; border-radius: 8px;">
      <p style="margin: 0; font-size: 12px;">FloodWatch System | Emergency Alert: {sent_at}</p>
    </div>
  </div>
</div>"#,
        banner = banner,
        icon = level.icon(),
        upper = upper,
        location = location,
        title = html_escape(&alert.title),
        name = html_escape(&recipient.name),
        message = html_escape(&alert.message),
        conditions = conditions,
        panel = panel,
        panel_text = panel_text,
        action_heading = action_heading,
        action_text = action_text,
        level = level,
        sent_at = sent_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// HTML body of the registration confirmation email
pub fn registration_email_html(registration: &Registration) -> String {
    let state = registration.state.as_deref().unwrap_or("Not specified");

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: linear-gradient(135deg, #0ea5e9, #0284c7); padding: 30px; border-radius: 10px; text-align: center; margin-bottom: 20px;">
    <h1 style="color: white; margin: 0; font-size: 28px;">🌤️ Weather Forecasting System</h1>
    <p style="color: white; margin: 10px 0 0 0; font-size: 16px;">Weather Forecasting &amp; Flood Monitoring Alert System</p>
  </div>
  <div style="background: #f8fafc; padding: 25px; border-radius: 8px; margin-bottom: 20px;">
    <h2 style="color: #1e293b; margin-top: 0;">Welcome {name}!</h2>
    <p style="color: #475569; line-height: 1.6;">Your registration for weather and flood alerts is confirmed.</p>
    <div style="background: white; padding: 20px; border-radius: 8px; border-left: 4px solid #0ea5e9; margin: 20px 0;">
      <h3 style="color: #1e293b; margin-top: 0;">Registration Details:</h3>
      <ul style="color: #475569; line-height: 1.8;">
        <li><strong>Name:</strong> {name}</li>
        <li><strong>Email:</strong> {email}</li>
        <li><strong>Location:</strong> {location}</li>
        <li><strong>State:</strong> {state}</li>
        <li><strong>Notification Methods:</strong> {channels}</li>
        <li><strong>Alert Levels:</strong> {levels}</li>
      </ul>
    </div>
    <div style="background: #fef3c7; padding: 15px; border-radius: 8px; border-left: 4px solid #f59e0b; margin: 20px 0;">
      <p style="color: #92400e; margin: 0;"><strong>⚠️ Important:</strong> You will now receive weather and flood alerts based on your selected preferences.</p>
    </div>
  </div>
</div>"#,
        name = html_escape(&registration.name),
        email = html_escape(&registration.email),
        location = html_escape(&registration.location),
        state = html_escape(state),
        channels = registration.notifications.labels().join(", "),
        levels = registration.alert_levels.labels().join(", "),
    )
}
