//! Outbound notification contract and message templates

mod message;
mod traits;

pub use message::verification_message;
pub use traits::{DeliveryReport, NotificationDispatcher};
