//! Mock SMS transport for development and testing
//!
//! Messages are logged instead of sent and the code is returned in the
//! receipt, so flows can be completed without a phone.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use pv_core::services::{DeliveryReceipt, MessageTransport, TransportError};
use pv_shared::phone::{is_valid_e164, mask_phone_number};

use super::format_verification_message;

/// Mock SMS transport
///
/// - Validates the destination number
/// - Generates `mock_` message ids
/// - Counts messages for tests
/// - Can be switched into failure mode
#[derive(Clone, Default)]
pub struct MockTransport {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that fails every send
    pub fn failing() -> Self {
        let transport = Self::new();
        transport.set_simulate_failure(true);
        transport
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageTransport for MockTransport {
    async fn send(
        &self,
        phone: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<DeliveryReceipt, TransportError> {
        let masked_phone = mask_phone_number(phone);

        if !is_valid_e164(phone) {
            return Err(TransportError::Rejected(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked_phone, "Mock SMS transport simulating failure");
            return Err(TransportError::Unavailable(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_number = count,
            body = %format_verification_message(code, valid_for),
            "Mock SMS sent"
        );

        Ok(DeliveryReceipt {
            message_id,
            mock_code: Some(code.to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
