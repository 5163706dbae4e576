pub mod error;
pub mod sms;

pub use error::*;
pub use sms::*;
