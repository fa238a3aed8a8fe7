//! SMS provider configuration

use serde::{Deserialize, Serialize};

/// Which transport delivers verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    #[default]
    Mock,
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

/// SMS transport configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SmsConfig {
    pub provider: SmsProvider,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Sender number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,
}

impl SmsConfig {
    /// Create a mock configuration
    pub fn mock() -> Self {
        Self::default()
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("SMS_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default();

        Self {
            provider,
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").ok(),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").ok(),
            from_number: std::env::var("TWILIO_FROM_NUMBER").ok(),
        }
    }

    /// Whether all Twilio credentials are present
    pub fn has_twilio_credentials(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("twilio".parse::<SmsProvider>().unwrap(), SmsProvider::Twilio);
        assert_eq!("MOCK".parse::<SmsProvider>().unwrap(), SmsProvider::Mock);
        assert!("carrier-pigeon".parse::<SmsProvider>().is_err());
    }

    #[test]
    fn test_mock_config() {
        let config = SmsConfig::mock();
        assert_eq!(config.provider, SmsProvider::Mock);
        assert!(!config.has_twilio_credentials());
    }
}
