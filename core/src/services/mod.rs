//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod clock;
pub mod dispatch;
pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use cleanup::CleanupTask;
pub use clock::{Clock, MockClock, SystemClock};
pub use dispatch::{verification_message, DeliveryReport, NotificationDispatcher};
pub use rate_limit::RateLimiter;
pub use verification::{
    SendCodeCommand, SendCodeResult, VerificationService, VerificationServiceConfig,
    VerificationStore, VerifiedIdentity,
};
