//! SMS Transport Module
//!
//! Implementations of `MessageTransport` for delivering verification codes:
//!
//! - **Mock**: logs the message and hands the code back to the caller
//! - **Twilio**: production delivery through the Twilio REST API

use chrono::Duration;
use std::sync::Arc;

use pv_core::services::MessageTransport;
use pv_shared::config::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

pub mod mock;
pub mod twilio;

pub use mock::MockTransport;
pub use twilio::{TwilioConfig, TwilioTransport};

#[cfg(test)]
mod tests;

/// Build the SMS body carrying a verification code and its lifetime
pub fn format_verification_message(code: &str, valid_for: Duration) -> String {
    format!(
        "Your verification code is: {}. It expires in {}. Do not share this code.",
        code,
        describe_lifetime(valid_for)
    )
}

/// Whole minutes when the lifetime divides evenly, seconds otherwise
fn describe_lifetime(valid_for: Duration) -> String {
    let seconds = valid_for.num_seconds().max(1);
    match (seconds / 60, seconds % 60) {
        (1, 0) => "1 minute".to_string(),
        (minutes, 0) => format!("{} minutes", minutes),
        _ if seconds == 1 => "1 second".to_string(),
        _ => format!("{} seconds", seconds),
    }
}

/// Create the message transport selected by configuration
///
/// # Returns
///
/// * `Ok(Arc<dyn MessageTransport>)` - The configured transport
/// * `Err(InfrastructureError::Config)` - Twilio selected without credentials
pub fn create_transport(config: &SmsConfig) -> Result<Arc<dyn MessageTransport>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::info!(provider = "mock", "Using mock SMS transport");
            Ok(Arc::new(MockTransport::new()))
        }
        SmsProvider::Twilio => {
            let twilio_config = TwilioConfig::from_sms_config(config)?;
            Ok(Arc::new(TwilioTransport::new(twilio_config)?))
        }
    }
}
