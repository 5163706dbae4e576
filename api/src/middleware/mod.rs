pub mod client_ip;
pub mod cors;

pub use client_ip::extract_client_ip;
pub use cors::create_cors;
