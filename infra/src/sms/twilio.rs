//! Twilio SMS transport
//!
//! Sends messages through the Twilio Messages REST endpoint with a form
//! POST and HTTP basic auth. Each send is a single attempt.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use pv_core::services::{DeliveryReceipt, MessageTransport, TransportError};
use pv_shared::config::SmsConfig;
use pv_shared::phone::{is_valid_e164, mask_phone_number};

use super::format_verification_message;
use crate::InfrastructureError;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Twilio limit for a single message body
const MAX_BODY_LENGTH: usize = 1600;

/// Twilio SMS transport configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// API base URL, overridable for testing
    pub api_base: String,
}

impl TwilioConfig {
    /// Build from the shared SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let account_sid = config
            .account_sid
            .clone()
            .ok_or_else(|| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = config
            .auth_token
            .clone()
            .ok_or_else(|| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = config
            .from_number
            .clone()
            .ok_or_else(|| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            api_base: TWILIO_API_BASE.to_string(),
        })
    }

    /// URL of the Messages resource for this account
    pub fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.api_base, self.account_sid)
    }
}

/// Successful Messages response; only the SID is used
#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Twilio error body
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Twilio SMS transport implementation
pub struct TwilioTransport {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioTransport {
    /// Create a new Twilio transport
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS transport initialized"
        );

        Ok(Self { client, config })
    }

    /// Map an HTTP failure status to a transport error
    ///
    /// 4xx other than 429 means Twilio refused the message; anything else
    /// is treated as the provider being unavailable.
    fn classify_status(status: reqwest::StatusCode, detail: String) -> TransportError {
        if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
            TransportError::Rejected(detail)
        } else {
            TransportError::Unavailable(detail)
        }
    }
}

#[async_trait]
impl MessageTransport for TwilioTransport {
    async fn send(
        &self,
        phone: &str,
        code: &str,
        valid_for: chrono::Duration,
    ) -> Result<DeliveryReceipt, TransportError> {
        let masked_phone = mask_phone_number(phone);
        if !is_valid_e164(phone) {
            return Err(TransportError::Rejected(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        let body = format_verification_message(code, valid_for);
        if body.len() > MAX_BODY_LENGTH {
            return Err(TransportError::Configuration(
                "Message exceeds maximum length of 1600 characters".to_string(),
            ));
        }

        let params = [
            ("To", phone),
            ("From", self.config.from_number.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(phone = %masked_phone, error = %e, "Twilio request failed");
                TransportError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorResponse>().await {
                Ok(ErrorResponse {
                    code: Some(code),
                    message: Some(message),
                }) => format!("{} (Twilio error {})", message, code),
                Ok(ErrorResponse {
                    message: Some(message),
                    ..
                }) => message,
                _ => format!("HTTP {}", status),
            };
            error!(
                phone = %masked_phone,
                status = status.as_u16(),
                detail = %detail,
                "Twilio rejected SMS"
            );
            return Err(Self::classify_status(status, detail));
        }

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Unavailable(format!("Unreadable Twilio response: {}", e)))?;

        info!(phone = %masked_phone, sid = %message.sid, "SMS sent via Twilio");

        Ok(DeliveryReceipt {
            message_id: message.sid,
            mock_code: None,
        })
    }

    fn provider_name(&self) -> &str {
        "twilio"
    }
}
