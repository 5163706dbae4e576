//! Signup phone verification endpoints
//!
//! - `POST /sms/send` issues a code and texts it to the phone number
//! - `POST /sms/verify` checks a submitted code against the session

pub mod send;
pub mod verify;

pub use send::send_code;
pub use verify::verify_code;
