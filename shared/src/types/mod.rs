//! Type definitions shared across crates
//!
//! - `language` - Language of outbound messages

pub mod language;

pub use language::Language;
