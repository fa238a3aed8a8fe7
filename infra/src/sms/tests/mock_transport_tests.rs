use chrono::Duration;
use pv_core::services::{MessageTransport, TransportError};

use crate::sms::MockTransport;

fn ttl() -> Duration {
    Duration::minutes(2)
}

#[tokio::test]
async fn test_mock_send_returns_code() {
    let transport = MockTransport::new();

    let receipt = transport.send("+15551230000", "482913", ttl()).await.unwrap();

    assert!(receipt.message_id.starts_with("mock_"));
    assert_eq!(receipt.mock_code.as_deref(), Some("482913"));
    assert_eq!(transport.get_message_count(), 1);
}

#[tokio::test]
async fn test_mock_rejects_invalid_number() {
    let transport = MockTransport::new();

    let err = transport.send("0555", "482913", ttl()).await.unwrap_err();

    assert!(matches!(err, TransportError::Rejected(_)));
    assert_eq!(transport.get_message_count(), 0);
}

#[tokio::test]
async fn test_mock_failure_mode() {
    let transport = MockTransport::failing();

    let err = transport.send("+15551230000", "482913", ttl()).await.unwrap_err();
    assert!(matches!(err, TransportError::Unavailable(_)));

    transport.set_simulate_failure(false);
    assert!(transport.send("+15551230000", "482913", ttl()).await.is_ok());
}

#[tokio::test]
async fn test_mock_counter_is_shared_between_clones() {
    let transport = MockTransport::new();
    let clone = transport.clone();

    clone.send("+15551230000", "111111", ttl()).await.unwrap();
    transport.send("+15551230000", "222222", ttl()).await.unwrap();

    assert_eq!(transport.get_message_count(), 2);
    transport.reset_counter();
    assert_eq!(clone.get_message_count(), 0);
}
