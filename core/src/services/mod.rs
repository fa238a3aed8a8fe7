//! Business services containing domain logic and use cases.

pub mod auth;
pub mod cleanup;
pub mod clock;
pub mod rate_limit;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use auth::{
    AuthService, AuthServiceConfig, AuthenticatedAccount, DeliveryReceipt, MessageTransport,
    PasswordHasher, RequestCodeResult, SessionGrant, TransportError,
};
pub use cleanup::{SweepResult, SweeperConfig, VerificationSweeper};
pub use clock::{Clock, MockClock, SystemClock};
pub use rate_limit::{CounterSnapshot, InMemoryRequestCounter, RequestCounter};
pub use session::{JwtCodec, SessionConfig, SessionIssuer, TokenCodec};
pub use verification::{
    AdmissionDecision, IssuedCode, Transition, VerificationFailure, VerificationPolicy,
};
